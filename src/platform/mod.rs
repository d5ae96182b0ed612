//! Platform collaborators around the filter session: where finished photos
//! go and who may use the editor.

pub mod auth;
pub mod photo_library;

pub use auth::{AccessGate, Authenticator, GateState, StaticAuthenticator, UnavailableAuthenticator};
pub use photo_library::{DirectoryPhotoLibrary, ImageSaver, PhotoLibrary, SavedPhoto};
