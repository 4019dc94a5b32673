//! Type identities and values for mapper chains.
//!
//! Chain resolution never inspects Rust types at runtime. Every logical type
//! a mapper can consume or produce is registered up front and receives a
//! [`TypeKey`]; all matching during resolution is key equality.
//!
//! # Architecture
//!
//! ```text
//! TypeRegistry (Rust TypeId / name -> TypeKey)
//!     └── TypeDescriptor (key + display name)
//!         └── Value (descriptor + type-erased data)
//!             └── ValuePool (append-only, ordered)
//! ```

mod descriptor;
mod key;
mod registry;
mod value;

pub use descriptor::TypeDescriptor;
pub use key::TypeKey;
pub use registry::{RegistryError, SharedTypeRegistry, TypeRegistry};
pub use value::{Value, ValuePool};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{TypeDescriptor, TypeKey};

    const _: () = assert!(std::mem::size_of::<TypeKey>() == 4);
    // key (4) + padding (4) + Arc<str> fat pointer (16)
    const _: () = assert!(std::mem::size_of::<TypeDescriptor>() == 24);
}
