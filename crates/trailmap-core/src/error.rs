pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Roadmap parse error: {message}")]
    RoadmapParse { message: String },
}
