pub mod fields;
pub mod parser;
pub mod scraper;
pub mod types;
pub mod utils;

pub use parser::{ParseError, parse_rikishi_page};
pub use scraper::{ScraperError, WebScraper};
pub use types::Rikishi;

pub(crate) const BASE_URL: &str = "http://sumodb.sumogames.de";
