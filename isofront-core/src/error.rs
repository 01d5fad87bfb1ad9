use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No valid graph location near ({lon:.6}, {lat:.6})")]
    PointNotFound { lat: f64, lon: f64 },
    #[error("No seed locations provided")]
    NoSeeds,
    #[error("No positive exploration limit configured")]
    LimitNotSet,
    #[error("Search has already been run on this tree")]
    SearchAlreadyRun,
    #[error("Search has not been run yet")]
    SearchNotRun,
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
