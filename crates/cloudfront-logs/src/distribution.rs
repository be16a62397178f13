//! CloudFront distribution definitions.

/// Id shared by the single origin and the default cache behavior that
/// targets it.
pub const PRIMARY_ORIGIN_ID: &str = "primary-origin";

pub const DEFAULT_COMMENT: &str = "Distribution created with CloudFront Access Logs V2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginProtocolPolicy {
    HttpOnly,
    MatchViewer,
    HttpsOnly,
}

impl OriginProtocolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginProtocolPolicy::HttpOnly => "http-only",
            OriginProtocolPolicy::MatchViewer => "match-viewer",
            OriginProtocolPolicy::HttpsOnly => "https-only",
        }
    }
}

/// Protocols CloudFront may use when talking to an origin over HTTPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslProtocol {
    SslV3,
    TlsV1,
    TlsV1_1,
    TlsV1_2,
}

impl SslProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslProtocol::SslV3 => "SSLv3",
            SslProtocol::TlsV1 => "TLSv1",
            SslProtocol::TlsV1_1 => "TLSv1.1",
            SslProtocol::TlsV1_2 => "TLSv1.2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerProtocolPolicy {
    AllowAll,
    HttpsOnly,
    RedirectToHttps,
}

impl ViewerProtocolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerProtocolPolicy::AllowAll => "allow-all",
            ViewerProtocolPolicy::HttpsOnly => "https-only",
            ViewerProtocolPolicy::RedirectToHttps => "redirect-to-https",
        }
    }
}

/// Edge locations a distribution is served from. `PriceClass100` is the
/// cheapest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceClass {
    PriceClass100,
    PriceClass200,
    PriceClassAll,
}

impl PriceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceClass::PriceClass100 => "PriceClass_100",
            PriceClass::PriceClass200 => "PriceClass_200",
            PriceClass::PriceClassAll => "PriceClass_All",
        }
    }
}

/// A custom (non-S3) origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOrigin {
    pub id: String,
    pub domain_name: String,
    pub http_port: i32,
    pub https_port: i32,
    pub protocol_policy: OriginProtocolPolicy,
    pub ssl_protocols: Vec<SslProtocol>,
}

impl CustomOrigin {
    /// An origin reached over HTTPS only, speaking TLS 1.2.
    pub fn https_only(domain_name: impl Into<String>) -> Self {
        Self {
            id: PRIMARY_ORIGIN_ID.to_owned(),
            domain_name: domain_name.into(),
            http_port: 80,
            https_port: 443,
            protocol_policy: OriginProtocolPolicy::HttpsOnly,
            ssl_protocols: vec![SslProtocol::TlsV1_2],
        }
    }
}

/// Ids of the managed or custom policies attached to the default cache
/// behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorPolicies {
    pub cache_policy_id: String,
    pub origin_request_policy_id: String,
    pub response_headers_policy_id: String,
}

/// Everything submitted to `CreateDistribution`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    // Must be unique per request, CloudFront rejects a reused reference
    // with different contents.
    pub caller_reference: String,
    pub comment: String,
    pub enabled: bool,
    pub origins: Vec<CustomOrigin>,
    pub target_origin_id: String,
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    pub policies: BehaviorPolicies,
    pub price_class: PriceClass,
}

impl Distribution {
    /// A single-origin, single-behavior distribution in front of
    /// `origin_host`.
    ///
    /// The origin is HTTPS-only with TLS 1.2, viewers are redirected to
    /// HTTPS and the distribution is served from the lowest price class.
    /// The caller reference is derived from the current Unix time.
    pub fn https_origin(origin_host: impl Into<String>, policies: BehaviorPolicies) -> Self {
        let caller_reference = format!("cli-reference-{}", chrono::Utc::now().timestamp());
        Self {
            caller_reference,
            comment: DEFAULT_COMMENT.to_owned(),
            enabled: true,
            origins: vec![CustomOrigin::https_only(origin_host)],
            target_origin_id: PRIMARY_ORIGIN_ID.to_owned(),
            viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
            policies,
            price_class: PriceClass::PriceClass100,
        }
    }
}

/// A distribution as known after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDistribution {
    pub id: String,
    pub domain_name: String,
    pub arn: String,
}
