use thiserror::Error;

pub type Result<T> = std::result::Result<T, LandscapeError>;

#[derive(Error, Debug)]
pub enum LandscapeError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep the enum small by boxing them on conversion
impl From<gix::object::find::existing::Error> for LandscapeError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        LandscapeError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for LandscapeError {
    fn from(err: gix::object::commit::Error) -> Self {
        LandscapeError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for LandscapeError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        LandscapeError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for LandscapeError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        LandscapeError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for LandscapeError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        LandscapeError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for LandscapeError {
    fn from(err: gix::objs::decode::Error) -> Self {
        LandscapeError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for LandscapeError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        LandscapeError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for LandscapeError {
    fn from(err: gix::discover::Error) -> Self {
        LandscapeError::GitDiscover(Box::new(err))
    }
}
