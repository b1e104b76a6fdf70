//! Object store adapter for the Darkroom asset pipeline.
//!
//! This crate provides:
//! - The [`ObjectStore`] trait: upload, batch delete, URL construction
//! - Collision-resistant storage key generation
//! - The [`UploadedFile`] type filled in by the upload layer
//! - Backends: AWS S3 (feature `s3`) and an in-memory bucket store
//!
//! # Quick Start
//!
//! ```no_run
//! use darkroom_storage::*;
//! use bytes::Bytes;
//!
//! # async fn example() -> Result<()> {
//! let store = MemoryStore::new("avatars");
//!
//! let key = generate_object_key();
//! let stored = store.put(&key, Bytes::from("file data"), "image/png").await?;
//! println!("stored at {}", stored.location);
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;
mod store;

#[cfg(feature = "s3")]
mod s3;

pub use error::*;
pub use file::*;
pub use memory::*;
pub use store::*;

#[cfg(feature = "s3")]
pub use s3::*;
