use crate::resolver::CheckConfig;

/// The number of redirects followed before a request is considered failed.
pub const MAX_REDIRECTS: usize = 10;

/// Settings for the HTTP client that are not part of the retry logic.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub follow_redirects: bool,
}

/// Builds the HTTP client shared by every attempt of a run.
///
/// The client timeout is the request timeout of `config`, so a single
/// attempt, connection setup included, can never take longer than that.
///
/// # Arguments
///
/// * `config` - The resolved check settings.
/// * `options` - User agent and redirect behaviour.
///
/// # Returns
///
/// A `Result` containing the built `Client` if successful, or the
/// `reqwest::Error` raised while initialising TLS or the resolver.
pub fn build_client(
    config: &CheckConfig,
    options: &ClientOptions,
) -> Result<reqwest::Client, reqwest::Error> {
    let redirect_policy = if options.follow_redirects {
        reqwest::redirect::Policy::limited(MAX_REDIRECTS)
    } else {
        reqwest::redirect::Policy::none()
    };

    reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(config.request_timeout)
        .redirect(redirect_policy)
        .build()
}
