//! Typed object-graph reader for Xcode project documents.
//!
//! ```no_run
//! use pbxgraph::Document;
//!
//! // project.json = `plutil -convert json project.pbxproj -o project.json`
//! let doc = Document::from_path("project.json")?;
//! let project = doc.root()?;
//! for target in project.as_project()?.targets()? {
//!     println!("{}", target.as_native_target()?.name()?);
//! }
//! # Ok::<(), pbxgraph::Error>(())
//! ```

pub mod document;
pub mod error;
pub mod kind;
pub mod object;
pub mod record;
pub mod resolver;
pub mod table;
pub mod views;

pub use document::Document;
pub use error::{Error, Result};
pub use kind::{ObjectKind, ALL_KINDS};
pub use object::{ObjRef, Object};
pub use record::{ObjectId, RawRecord};
pub use resolver::AuditReport;
