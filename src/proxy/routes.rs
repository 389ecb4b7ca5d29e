// Route table: local gateway paths mapped onto downstream API paths

use std::collections::HashMap;
use std::fmt;

use crate::error::{AppError, AppResult};
use crate::proxy::common::utils::mint_resource_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    /// POST and PATCH forward the inbound body
    pub fn carries_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Patch)
    }
}

#[derive(Debug)]
pub struct RouteEntry {
    pub verb: Verb,
    /// Axum pattern with `:name` segments
    pub local_path: &'static str,
    /// Downstream template with `{name}` segments
    pub remote_path: &'static str,
    /// Template parameter filled with a fresh identifier instead of the request
    pub minted: Option<&'static str>,
}

const fn route(verb: Verb, local_path: &'static str, remote_path: &'static str) -> RouteEntry {
    RouteEntry {
        verb,
        local_path,
        remote_path,
        minted: None,
    }
}

const fn minting(
    verb: Verb,
    local_path: &'static str,
    remote_path: &'static str,
    param: &'static str,
) -> RouteEntry {
    RouteEntry {
        verb,
        local_path,
        remote_path,
        minted: Some(param),
    }
}

use Verb::{Delete, Get, Patch, Post};

pub static ROUTES: &[RouteEntry] = &[
    // Accounts
    minting(Post, "/api/accounts", "/v1/accounts/{accountID}", "accountID"),
    route(Get, "/api/accounts", "/v1/accounts"),
    route(Get, "/api/accounts/:accountID", "/v1/accounts/{accountID}"),
    route(Patch, "/api/accounts/:accountID", "/v1/accounts/{accountID}"),
    route(Get, "/api/accounts/:accountID/status", "/v1/accounts/{accountID}/status"),
    route(Get, "/api/accounts/:accountID/applicants/:applicantID", "/v1/accounts/{accountID}/applicants/{applicantID}"),
    route(Patch, "/api/accounts/:accountID/applicants/:applicantID", "/v1/accounts/{accountID}/applicants/{applicantID}"),
    route(Get, "/api/accounts/:accountID/beneficiaries/:beneficiaryID", "/v1/accounts/{accountID}/beneficiaries/{beneficiaryID}"),
    route(Patch, "/api/accounts/:accountID/beneficiaries/:beneficiaryID", "/v1/accounts/{accountID}/beneficiaries/{beneficiaryID}"),
    // Files
    route(Post, "/api/files", "/v1/files"),
    route(Get, "/api/files/:fileID", "/v1/files/{fileID}"),
    // Funding sources
    route(Get, "/api/accounts/:accountID/sources", "/v1/accounts/{accountID}/sources"),
    route(Post, "/api/accounts/:accountID/sources/:sourceID", "/v1/accounts/{accountID}/sources/{sourceID}"),
    route(Get, "/api/accounts/:accountID/sources/:sourceID", "/v1/accounts/{accountID}/sources/{sourceID}"),
    route(Patch, "/api/accounts/:accountID/sources/:sourceID", "/v1/accounts/{accountID}/sources/{sourceID}"),
    route(Delete, "/api/accounts/:accountID/sources/:sourceID", "/v1/accounts/{accountID}/sources/{sourceID}"),
    route(Post, "/api/accounts/:accountID/sources/:sourceID/verify", "/v1/accounts/{accountID}/sources/{sourceID}/verify"),
    route(Post, "/api/accounts/:accountID/sources/:sourceID/reverify", "/v1/accounts/{accountID}/sources/{sourceID}/reverify"),
    // Transfers
    route(Get, "/api/accounts/:accountID/transfers", "/v1/accounts/{accountID}/transfers"),
    route(Post, "/api/accounts/:accountID/transfers/:transferID", "/v1/accounts/{accountID}/transfers/{transferID}"),
    route(Get, "/api/accounts/:accountID/transfers/:transferID", "/v1/accounts/{accountID}/transfers/{transferID}"),
    route(Delete, "/api/accounts/:accountID/transfers/:transferID", "/v1/accounts/{accountID}/transfers/{transferID}"),
    // Portfolio
    route(Get, "/api/accounts/:accountID/portfolio/cash/USD", "/v1/accounts/{accountID}/portfolio/cash/USD"),
    route(Get, "/api/accounts/:accountID/portfolio/cash/USD/transactions", "/v1/accounts/{accountID}/portfolio/cash/USD/transactions"),
    route(Get, "/api/accounts/:accountID/portfolio/equities", "/v1/accounts/{accountID}/portfolio/equities"),
    route(Get, "/api/accounts/:accountID/portfolio/equities/:symbol/transactions", "/v1/accounts/{accountID}/portfolio/equities/{symbol}/transactions"),
    // Orders
    route(Get, "/api/accounts/:accountID/orders", "/v1/accounts/{accountID}/orders"),
    route(Post, "/api/accounts/:accountID/orders/:orderID", "/v1/accounts/{accountID}/orders/{orderID}"),
    route(Get, "/api/accounts/:accountID/orders/:orderID", "/v1/accounts/{accountID}/orders/{orderID}"),
    route(Patch, "/api/accounts/:accountID/orders/:orderID", "/v1/accounts/{accountID}/orders/{orderID}"),
    route(Delete, "/api/accounts/:accountID/orders/:orderID", "/v1/accounts/{accountID}/orders/{orderID}"),
    // Market data
    route(Get, "/api/market/hours/:date", "/v1/market/hours/{date}"),
    route(Get, "/api/market/symbols/:symbol", "/v1/market/symbols/{symbol}"),
    route(Get, "/api/market/symbols/:symbol/quote", "/v1/market/symbols/{symbol}/quote"),
    route(Get, "/api/market/symbols/:symbol/options", "/v1/market/symbols/{symbol}/options"),
    route(Get, "/api/market/symbols/:symbol/timeseries/intraday", "/v1/market/symbols/{symbol}/timeseries/intraday"),
    route(Get, "/api/market/symbols/:symbol/timeseries/eod", "/v1/market/symbols/{symbol}/timeseries/eod"),
    route(Get, "/api/market/symbols/:symbol/splits", "/v1/market/symbols/{symbol}/splits"),
    route(Get, "/api/market/symbols/:symbol/dividends", "/v1/market/symbols/{symbol}/dividends"),
    route(Get, "/api/market/quote", "/v1/market/quote"),
    route(Get, "/api/market/overview", "/v1/market/overview"),
    // Company data
    route(Get, "/api/market/symbols/:symbol/company/profile", "/v1/market/symbols/{symbol}/company/profile"),
    route(Get, "/api/market/symbols/:symbol/company/financials", "/v1/market/symbols/{symbol}/company/financials"),
    route(Get, "/api/market/symbols/:symbol/company/ownership", "/v1/market/symbols/{symbol}/company/ownership"),
    route(Get, "/api/market/symbols/:symbol/company/earnings/events", "/v1/market/symbols/{symbol}/company/earnings/events"),
    route(Get, "/api/market/symbols/:symbol/company/earnings/surprises", "/v1/market/symbols/{symbol}/company/earnings/surprises"),
    route(Get, "/api/market/symbols/:symbol/company/ratings", "/v1/market/symbols/{symbol}/company/ratings"),
    route(Get, "/api/market/symbols/:symbol/company/ratios", "/v1/market/symbols/{symbol}/company/ratios"),
    route(Get, "/api/market/symbols/:symbol/company/news", "/v1/market/symbols/{symbol}/company/news"),
    // Documents
    route(Get, "/api/accounts/:accountID/documents/confirmations", "/v1/accounts/{accountID}/documents/confirmations"),
    route(Get, "/api/accounts/:accountID/documents/statements", "/v1/accounts/{accountID}/documents/statements"),
    // Events
    route(Get, "/api/events", "/v1/events"),
    route(Post, "/api/events", "/v1/events"),
];

/// Rendered downstream path, kept as raw segments until URL encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath(Vec<String>);

impl RemotePath {
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl RouteEntry {
    /// Substitute path parameters (and any minted identifier) into the template
    pub fn render(&self, params: &HashMap<String, String>) -> AppResult<RemotePath> {
        let mut segments = Vec::new();
        for part in self.remote_path.split('/').filter(|s| !s.is_empty()) {
            let name = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => name,
                None => {
                    segments.push(part.to_string());
                    continue;
                }
            };

            if self.minted == Some(name) {
                segments.push(mint_resource_id());
                continue;
            }

            let value = params.get(name).ok_or_else(|| {
                AppError::Route(format!(
                    "{} has no value for parameter {:?}",
                    self.local_path, name
                ))
            })?;
            segments.push(value.clone());
        }
        Ok(RemotePath(segments))
    }
}
