//! URL validator plus parse/normalize helpers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::{Host, Url};

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

// ============================================================================
// PARSE / NORMALIZE HELPERS
// ============================================================================

/// Structured components of a parsed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    pub scheme: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

/// Parses a URL into its components, or `None` if it does not parse.
#[must_use]
pub fn parse_url(input: &str) -> Option<UrlParts> {
    let url = Url::parse(input.trim()).ok()?;
    Some(UrlParts {
        scheme: url.scheme().to_string(),
        host: url.host_str().map(str::to_string),
        port: url.port(),
        path: url.path().to_string(),
        query: url.query().map(str::to_string),
        fragment: url.fragment().map(str::to_string),
    })
}

/// Normalizes a URL: lower-cases the host, strips the scheme's default
/// port, and drops a bare `/` path. Returns `None` if the URL does not
/// parse.
#[must_use]
pub fn normalize_url(input: &str) -> Option<String> {
    // The url crate already lower-cases the host and omits default ports
    // when re-serializing.
    let url = Url::parse(input.trim()).ok()?;
    let mut out = url.to_string();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        if let Some(stripped) = out.strip_suffix('/') {
            out = stripped.to_string();
        }
    }
    Some(out)
}

// ============================================================================
// URL VALIDATOR
// ============================================================================

/// Validates URLs against a scheme, host, port, path, query and fragment
/// policy.
///
/// Check order: required, length, parse, scheme, credentials, host
/// (IP policy, domain allow-list, TLD allow-list), port, path, query,
/// fragment. The normalized value is the output of [`normalize_url`].
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::contact::UrlValidator;
///
/// let validator = UrlValidator::new();
/// assert_eq!(
///     validator.validate("HTTP://Example.COM:80/").unwrap(),
///     "http://example.com"
/// );
/// assert!(validator.validate("ftp://example.com").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_schemes: Vec<String>,
    allowed_domains: Vec<String>,
    match_subdomains: bool,
    allow_ip_hosts: bool,
    allowed_tlds: Vec<String>,
    allowed_ports: Vec<u16>,
    denied_ports: Vec<u16>,
    require_path: bool,
    path_pattern: Option<Regex>,
    max_path_segments: Option<usize>,
    required_query_params: Vec<String>,
    allowed_query_params: Option<Vec<String>>,
    allow_fragment: bool,
    allow_credentials: bool,
    max_length: usize,
}

impl UrlValidator {
    /// Default maximum URL length.
    pub const DEFAULT_MAX_LENGTH: usize = 2048;

    /// Creates a URL validator with default settings.
    ///
    /// Defaults: http/https only, any domain, IP hosts allowed, any port,
    /// path optional, any query, fragments allowed, credentials rejected,
    /// max length 2048.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            allowed_domains: Vec::new(),
            match_subdomains: false,
            allow_ip_hosts: true,
            allowed_tlds: Vec::new(),
            allowed_ports: Vec::new(),
            denied_ports: Vec::new(),
            require_path: false,
            path_pattern: None,
            max_path_segments: None,
            required_query_params: Vec::new(),
            allowed_query_params: None,
            allow_fragment: true,
            allow_credentials: false,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }

    /// Replaces the scheme allow-list.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_schemes = schemes
            .into_iter()
            .map(|s| s.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Only accepts hosts from the listed domains.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| d.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Makes the domain allow-list suffix-aware (subdomains match).
    #[must_use = "builder methods must be chained or built"]
    pub fn match_subdomains(mut self) -> Self {
        self.match_subdomains = true;
        self
    }

    /// Rejects IP-address hosts.
    #[must_use = "builder methods must be chained or built"]
    pub fn forbid_ip_hosts(mut self) -> Self {
        self.allow_ip_hosts = false;
        self
    }

    /// Only accepts the listed top-level domains (e.g. `com`, `org`).
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_tlds<I, S>(mut self, tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tlds = tlds
            .into_iter()
            .map(|t| t.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Only accepts the listed explicit ports.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_ports<I: IntoIterator<Item = u16>>(mut self, ports: I) -> Self {
        self.allowed_ports = ports.into_iter().collect();
        self
    }

    /// Rejects the listed explicit ports.
    #[must_use = "builder methods must be chained or built"]
    pub fn denied_ports<I: IntoIterator<Item = u16>>(mut self, ports: I) -> Self {
        self.denied_ports = ports.into_iter().collect();
        self
    }

    /// Requires a non-trivial path component.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_path(mut self) -> Self {
        self.require_path = true;
        self
    }

    /// Requires the path to match a precompiled pattern.
    #[must_use = "builder methods must be chained or built"]
    pub fn path_pattern(mut self, pattern: Regex) -> Self {
        self.path_pattern = Some(pattern);
        self
    }

    /// Caps the number of path segments.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_path_segments(mut self, max: usize) -> Self {
        self.max_path_segments = Some(max);
        self
    }

    /// Requires the listed query parameters to be present.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_query_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_query_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts query parameters to the listed names.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_query_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_query_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Rejects URLs carrying a fragment.
    #[must_use = "builder methods must be chained or built"]
    pub fn forbid_fragment(mut self) -> Self {
        self.allow_fragment = false;
        self
    }

    /// Accepts URLs with embedded credentials (rejected by default).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_credentials(mut self) -> Self {
        self.allow_credentials = true;
        self
    }

    /// Overrides the maximum URL length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    fn domain_allowed(&self, domain: &str) -> bool {
        self.allowed_domains.iter().any(|allowed| {
            domain == allowed
                || (self.match_subdomains && domain.ends_with(&format!(".{allowed}")))
        })
    }

    fn check_host(&self, url: &Url) -> ValidationResult<()> {
        match url.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.to_ascii_lowercase();
                if !self.allowed_domains.is_empty() && !self.domain_allowed(&domain) {
                    return Err(ValidationError::new(
                        ErrorCode::UrlDomainNotAllowed,
                        format!("URL domain '{domain}' is not allowed"),
                    )
                    .with_param("domain", domain));
                }
                if !self.allowed_tlds.is_empty() {
                    let tld = domain.rsplit('.').next().unwrap_or_default();
                    if !self.allowed_tlds.iter().any(|t| t == tld) {
                        return Err(ValidationError::new(
                            ErrorCode::UrlTldNotAllowed,
                            format!("URL top-level domain '{tld}' is not allowed"),
                        )
                        .with_param("tld", tld));
                    }
                }
                Ok(())
            }
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
                if !self.allow_ip_hosts {
                    return Err(ValidationError::new(
                        ErrorCode::UrlIpNotAllowed,
                        "IP-address hosts are not allowed",
                    ));
                }
                // Domain allow-lists never match a raw IP host.
                if !self.allowed_domains.is_empty() {
                    return Err(ValidationError::new(
                        ErrorCode::UrlDomainNotAllowed,
                        "URL host is not an allowed domain",
                    ));
                }
                Ok(())
            }
            None => Err(ValidationError::new(
                ErrorCode::UrlInvalidFormat,
                "URL has no host",
            )),
        }
    }

    fn check_path(&self, url: &Url) -> ValidationResult<()> {
        let path = url.path();
        let has_path = !path.is_empty() && path != "/";

        if self.require_path && !has_path {
            return Err(ValidationError::new(
                ErrorCode::UrlPathRequired,
                "URL must have a path",
            ));
        }
        if let Some(pattern) = &self.path_pattern {
            if !pattern.is_match(path) {
                return Err(ValidationError::new(
                    ErrorCode::UrlPathInvalid,
                    format!("URL path must match pattern {}", pattern.as_str()),
                ));
            }
        }
        if let Some(max) = self.max_path_segments {
            let segments = path.split('/').filter(|s| !s.is_empty()).count();
            if segments > max {
                return Err(ValidationError::new(
                    ErrorCode::UrlPathInvalid,
                    format!("URL path must have at most {max} segments"),
                )
                .with_param("max", max.to_string())
                .with_param("actual", segments.to_string()));
            }
        }
        Ok(())
    }

    fn check_query(&self, url: &Url) -> ValidationResult<()> {
        let names: Vec<String> = url
            .query_pairs()
            .map(|(name, _)| name.into_owned())
            .collect();

        for required in &self.required_query_params {
            if !names.iter().any(|n| n == required) {
                return Err(ValidationError::new(
                    ErrorCode::UrlQueryParamMissing,
                    format!("URL query parameter '{required}' is required"),
                )
                .with_param("param", required));
            }
        }
        if let Some(allowed) = &self.allowed_query_params {
            if let Some(extra) = names.iter().find(|n| !allowed.contains(n)) {
                return Err(ValidationError::new(
                    ErrorCode::UrlQueryParamNotAllowed,
                    format!("URL query parameter '{extra}' is not allowed"),
                )
                .with_param("param", extra.clone()));
            }
        }
        Ok(())
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::new(ErrorCode::UrlRequired, "URL is required"));
        }

        if raw.chars().count() > self.max_length {
            return Err(ValidationError::new(
                ErrorCode::UrlTooLong,
                format!("URL must be at most {} characters", self.max_length),
            )
            .with_param("max", self.max_length.to_string()));
        }

        let url = Url::parse(raw).map_err(|err| {
            trace!(input = raw, %err, "url failed to parse");
            ValidationError::new(ErrorCode::UrlInvalidFormat, "URL format is invalid")
        })?;

        let scheme = url.scheme();
        if !self.allowed_schemes.iter().any(|s| s == scheme) {
            return Err(ValidationError::new(
                ErrorCode::UrlSchemeNotAllowed,
                format!("URL scheme '{scheme}' is not allowed"),
            )
            .with_param("scheme", scheme));
        }

        if !self.allow_credentials && (!url.username().is_empty() || url.password().is_some()) {
            return Err(ValidationError::new(
                ErrorCode::UrlCredentialsNotAllowed,
                "URL must not embed credentials",
            ));
        }

        self.check_host(&url)?;

        if let Some(port) = url.port() {
            if self.denied_ports.contains(&port) {
                return Err(ValidationError::new(
                    ErrorCode::UrlPortNotAllowed,
                    format!("URL port {port} is not allowed"),
                )
                .with_param("port", port.to_string()));
            }
            if !self.allowed_ports.is_empty() && !self.allowed_ports.contains(&port) {
                return Err(ValidationError::new(
                    ErrorCode::UrlPortNotAllowed,
                    format!("URL port {port} is not allowed"),
                )
                .with_param("port", port.to_string()));
            }
        }

        self.check_path(&url)?;
        self.check_query(&url)?;

        if !self.allow_fragment && url.fragment().is_some() {
            return Err(ValidationError::new(
                ErrorCode::UrlFragmentNotAllowed,
                "URL must not have a fragment",
            ));
        }

        // Parse succeeded above, so normalization cannot fail.
        normalize_url(raw).ok_or_else(|| {
            ValidationError::new(ErrorCode::UrlInvalidFormat, "URL format is invalid")
        })
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Url")
            .with_description("URL scheme, host, port, path and query policy")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("contact")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod helpers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn parse_url_extracts_components() {
            let parts = parse_url("https://user.example.com:8443/a/b?x=1#frag").unwrap();
            assert_eq!(parts.scheme, "https");
            assert_eq!(parts.host.as_deref(), Some("user.example.com"));
            assert_eq!(parts.port, Some(8443));
            assert_eq!(parts.path, "/a/b");
            assert_eq!(parts.query.as_deref(), Some("x=1"));
            assert_eq!(parts.fragment.as_deref(), Some("frag"));
        }

        #[test]
        fn parse_url_rejects_garbage() {
            assert!(parse_url("not a url").is_none());
        }

        #[test]
        fn normalize_lowercases_host_and_strips_default_port() {
            assert_eq!(
                normalize_url("HTTP://Example.COM:80/").as_deref(),
                Some("http://example.com")
            );
            assert_eq!(
                normalize_url("https://example.com:8443/x").as_deref(),
                Some("https://example.com:8443/x")
            );
        }

        #[test]
        fn normalize_keeps_slash_when_query_present() {
            assert_eq!(
                normalize_url("http://example.com/?a=1").as_deref(),
                Some("http://example.com/?a=1")
            );
        }
    }

    mod schemes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn http_and_https_by_default() {
            let validator = UrlValidator::new();
            assert!(validator.validate("http://example.com").is_ok());
            assert!(validator.validate("https://example.com").is_ok());
            assert_eq!(
                validator.validate("ftp://example.com").unwrap_err().code(),
                ErrorCode::UrlSchemeNotAllowed
            );
        }
    }

    mod hosts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn domain_allowlist_with_subdomains() {
            let exact = UrlValidator::new().allowed_domains(["example.com"]);
            assert!(exact.validate("https://example.com").is_ok());
            assert_eq!(
                exact.validate("https://sub.example.com").unwrap_err().code(),
                ErrorCode::UrlDomainNotAllowed
            );

            let suffix = UrlValidator::new()
                .allowed_domains(["example.com"])
                .match_subdomains();
            assert!(suffix.validate("https://sub.example.com").is_ok());
            assert!(suffix.validate("https://notexample.com").is_err());
        }

        #[test]
        fn ip_policy() {
            let open = UrlValidator::new();
            assert!(open.validate("http://127.0.0.1:8080").is_ok());

            let closed = UrlValidator::new().forbid_ip_hosts();
            assert_eq!(
                closed.validate("http://127.0.0.1:8080").unwrap_err().code(),
                ErrorCode::UrlIpNotAllowed
            );
        }

        #[test]
        fn tld_allowlist() {
            let validator = UrlValidator::new().allowed_tlds(["com", "org"]);
            assert!(validator.validate("https://example.org").is_ok());
            assert_eq!(
                validator.validate("https://example.dev").unwrap_err().code(),
                ErrorCode::UrlTldNotAllowed
            );
        }
    }

    mod ports {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn allow_and_deny_lists() {
            let validator = UrlValidator::new()
                .allowed_ports([8080, 8443])
                .denied_ports([8081]);
            assert!(validator.validate("http://example.com:8080").is_ok());
            assert_eq!(
                validator.validate("http://example.com:9000").unwrap_err().code(),
                ErrorCode::UrlPortNotAllowed
            );
            assert_eq!(
                validator.validate("http://example.com:8081").unwrap_err().code(),
                ErrorCode::UrlPortNotAllowed
            );
            // Default ports are never explicit, so the lists do not apply.
            assert!(validator.validate("http://example.com").is_ok());
        }
    }

    mod paths {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn path_requirement_and_pattern() {
            let validator = UrlValidator::new()
                .require_path()
                .path_pattern(Regex::new(r"^/api/").expect("valid regex"));
            assert!(validator.validate("https://example.com/api/v1").is_ok());
            assert_eq!(
                validator.validate("https://example.com").unwrap_err().code(),
                ErrorCode::UrlPathRequired
            );
            assert_eq!(
                validator.validate("https://example.com/web").unwrap_err().code(),
                ErrorCode::UrlPathInvalid
            );
        }

        #[test]
        fn segment_cap() {
            let validator = UrlValidator::new().max_path_segments(2);
            assert!(validator.validate("https://example.com/a/b").is_ok());
            assert_eq!(
                validator.validate("https://example.com/a/b/c").unwrap_err().code(),
                ErrorCode::UrlPathInvalid
            );
        }
    }

    mod queries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn required_params() {
            let validator = UrlValidator::new().required_query_params(["token"]);
            assert!(validator.validate("https://example.com/?token=abc").is_ok());
            assert_eq!(
                validator.validate("https://example.com/?other=1").unwrap_err().code(),
                ErrorCode::UrlQueryParamMissing
            );
        }

        #[test]
        fn allowed_params() {
            let validator = UrlValidator::new().allowed_query_params(["page", "sort"]);
            assert!(validator.validate("https://example.com/?page=2&sort=asc").is_ok());
            assert_eq!(
                validator.validate("https://example.com/?page=2&evil=1").unwrap_err().code(),
                ErrorCode::UrlQueryParamNotAllowed
            );
        }
    }

    mod misc {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn fragment_policy() {
            let validator = UrlValidator::new().forbid_fragment();
            assert_eq!(
                validator.validate("https://example.com/#top").unwrap_err().code(),
                ErrorCode::UrlFragmentNotAllowed
            );
        }

        #[test]
        fn credentials_rejected_by_default() {
            let validator = UrlValidator::new();
            assert_eq!(
                validator.validate("https://user:pw@example.com").unwrap_err().code(),
                ErrorCode::UrlCredentialsNotAllowed
            );
            assert!(UrlValidator::new()
                .allow_credentials()
                .validate("https://user:pw@example.com")
                .is_ok());
        }

        #[test]
        fn length_limit() {
            let validator = UrlValidator::new().max_length(20);
            assert_eq!(
                validator
                    .validate("https://example.com/very/long/path")
                    .unwrap_err()
                    .code(),
                ErrorCode::UrlTooLong
            );
        }

        #[test]
        fn empty_is_required() {
            let validator = UrlValidator::new();
            assert_eq!(
                validator.validate("").unwrap_err().code(),
                ErrorCode::UrlRequired
            );
        }
    }
}
