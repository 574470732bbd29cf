use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while fetching, normalizing or rendering weather data.
///
/// None of these are recovered mid-run: the first one aborts the batch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),

    #[error("Insufficient {section} data: expected at least {expected} entries, got {actual}")]
    InsufficientData {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown current-weather field '{0}'")]
    UnknownField(String),

    #[error("Unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("Document has no <{tag}> section{}", with_id(.id))]
    MissingSection { tag: String, id: Option<String> },

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn missing_section(tag: &str, id: Option<&str>) -> Self {
        Self::MissingSection {
            tag: tag.to_string(),
            id: id.map(str::to_string),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Markup(err.to_string())
    }
}

fn with_id(id: &Option<String>) -> String {
    id.as_ref().map(|id| format!(" with id '{id}'")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_mentions_id() {
        let err = Error::missing_section("div", Some("current"));
        assert_eq!(err.to_string(), "Document has no <div> section with id 'current'");

        let err = Error::missing_section("CatapultToc", None);
        assert_eq!(err.to_string(), "Document has no <CatapultToc> section");
    }

    #[test]
    fn insufficient_data_names_section() {
        let err = Error::InsufficientData { section: "hourly", expected: 12, actual: 3 };
        assert!(err.to_string().contains("hourly"));
        assert!(err.to_string().contains("got 3"));
    }
}
