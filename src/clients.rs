pub mod article_api;

pub use article_api::{ArticleApiClient, ArticleApiConfig};
