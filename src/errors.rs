use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("failed to fetch {} from the openf1 api: {}", resource, source))]
    FetchFailed {
        resource: &'static str,
        source: reqwest::Error,
    },

    #[snafu(display("rating must be between 1 and 5 stars, got {}", rating))]
    InvalidRating { rating: i32 },
}
