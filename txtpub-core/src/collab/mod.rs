//! Collaborators around the conversion core: choosing an input file and
//! suggesting a directory to start from. Neither is needed for a conversion
//! to succeed.

mod directory;
mod selector;

pub use directory::{
    DirectoryProvider, DocumentsDirectory, FirstAvailable, NoDirectory, SettingsFileDirectory,
};
pub use selector::{FileSelector, NoSelection, PromptSelector};
