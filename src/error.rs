use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ServiceError {
    #[error("missing required parameter `{0}`")]
    MissingParam(&'static str),
    #[error("user not found")]
    UserNotFound,
    #[error("rate limit exceeded")]
    RateLimit,
    #[error("graphql error: {0}")]
    Graphql(String),
    #[error("network error: {0}")]
    Network(String),
}

impl ServiceError {
    pub fn message(&self) -> String {
        match self {
            Self::MissingParam(_) | Self::Graphql(_) | Self::Network(_) => {
                "Something went wrong".to_string()
            }
            Self::UserNotFound => "Could not fetch user".to_string(),
            Self::RateLimit => "Rate limit exceeded".to_string(),
        }
    }

    pub fn secondary_message(&self) -> String {
        match self {
            Self::MissingParam(name) => {
                format!("Missing params \"{name}\" make sure you pass the parameters in URL")
            }
            Self::UserNotFound => {
                "Make sure the provided username is not an organization".to_string()
            }
            Self::RateLimit => "Please try again later".to_string(),
            Self::Graphql(message) => message.clone(),
            Self::Network(_) => "Please try again later".to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParam(_) => "missing-param",
            Self::UserNotFound => "user-not-found",
            Self::RateLimit => "rate-limit",
            Self::Graphql(_) => "graphql",
            Self::Network(_) => "network",
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;

    #[test]
    fn missing_param_names_the_parameter() {
        let error = ServiceError::MissingParam("username");
        assert!(error.secondary_message().contains("\"username\""));
        assert_eq!(error.message(), "Something went wrong");
    }

    #[test]
    fn graphql_error_forwards_upstream_text() {
        let error = ServiceError::Graphql("Please try again later".to_string());
        assert_eq!(error.secondary_message(), "Please try again later");
    }
}
