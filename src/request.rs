//! Per-operation request descriptors.
//!
//! Each builder validates its input, shapes the JSON payload and names the
//! endpoint. Nothing here touches the network; the executor in `client.rs`
//! consumes the result.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{Pagination, SendEmailOptions, StatusQuery};
use crate::{Error, Result, email};

pub(crate) const MAIL_SEND: &str = "api/v2/mail/send";
pub(crate) const ISSUE_STATUS: &str = "api/v2/issue/status";
pub(crate) const ISSUE_STATISTICS: &str = "api/v2/issue/statistics";
pub(crate) const REPORT_NON_DELIVERY: &str = "api/v2/blist/report/non-delivery";
pub(crate) const REPORT_FBL: &str = "api/v2/blist/report/fbl";
pub(crate) const STOP_LIST_SEARCH: &str = "api/v2/stop-list/search";
pub(crate) const STOP_LIST_ADD: &str = "api/v2/stop-list/add";
pub(crate) const STOP_LIST_REMOVE: &str = "api/v2/stop-list/remove";
pub(crate) const DOMAINS: &str = "api/v2/blist/domains";
pub(crate) const DOMAIN_ADD: &str = "api/v2/blist/domains/add";
pub(crate) const DOMAIN_REMOVE: &str = "api/v2/blist/domains/remove";
pub(crate) const DOMAIN_VERIFY: &str = "api/v2/blist/domains/verify";

/// One call against the API, described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestDescriptor {
    pub method: Method,
    pub endpoint: &'static str,
    pub payload: Value,
}

impl RequestDescriptor {
    fn new(method: Method, endpoint: &'static str, payload: &impl Serialize) -> Result<Self> {
        let payload = serde_json::to_value(payload).map_err(Error::Encode)?;
        Ok(Self {
            method,
            endpoint,
            payload,
        })
    }
}

#[derive(Serialize)]
struct SendEmailPayload<'a> {
    email_to: &'a str,
    subject: &'a str,
    message_text: &'a str,
    email_from: String,
    #[serde(flatten)]
    options: &'a SendEmailOptions,
}

#[derive(Serialize)]
struct DateRangePayload<'a> {
    date_from: &'a str,
    date_to: &'a str,
    limit: u32,
    cursor_next: u64,
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct StopListPayload<'a> {
    email: &'a str,
    mail_from: String,
}

#[derive(Serialize)]
struct DomainPayload<'a> {
    domain: &'a str,
}

pub(crate) fn send_email(
    email_to: &str,
    subject: &str,
    message_text: &str,
    email_from: &str,
    options: &SendEmailOptions,
) -> Result<RequestDescriptor> {
    email::validate(email_to)?;
    email::validate(email_from)?;

    let email_from = match &options.name_from {
        Some(name) => format!("{name} <{email_from}>"),
        None => email_from.to_string(),
    };

    RequestDescriptor::new(
        Method::POST,
        MAIL_SEND,
        &SendEmailPayload {
            email_to,
            subject,
            message_text,
            email_from,
            options,
        },
    )
}

pub(crate) fn status(query: &StatusQuery) -> Result<RequestDescriptor> {
    if let Some(email) = &query.email {
        email::validate(email)?;
    }
    RequestDescriptor::new(Method::GET, ISSUE_STATUS, query)
}

pub(crate) fn statistics(
    date_from: &str,
    date_to: &str,
    page: Pagination,
) -> Result<RequestDescriptor> {
    date_range(ISSUE_STATISTICS, date_from, date_to, page)
}

pub(crate) fn non_delivery(
    date_from: &str,
    date_to: &str,
    page: Pagination,
) -> Result<RequestDescriptor> {
    date_range(REPORT_NON_DELIVERY, date_from, date_to, page)
}

pub(crate) fn fbl_report(
    date_from: &str,
    date_to: &str,
    page: Pagination,
) -> Result<RequestDescriptor> {
    date_range(REPORT_FBL, date_from, date_to, page)
}

fn date_range(
    endpoint: &'static str,
    date_from: &str,
    date_to: &str,
    page: Pagination,
) -> Result<RequestDescriptor> {
    RequestDescriptor::new(
        Method::GET,
        endpoint,
        &DateRangePayload {
            date_from,
            date_to,
            limit: page.limit_or_default(),
            cursor_next: page.cursor_or_default(),
        },
    )
}

pub(crate) fn stop_list_search(email: &str) -> Result<RequestDescriptor> {
    email::validate(email)?;
    RequestDescriptor::new(Method::GET, STOP_LIST_SEARCH, &EmailPayload { email })
}

pub(crate) fn stop_list_add(email: &str, domain: &str) -> Result<RequestDescriptor> {
    stop_list_change(STOP_LIST_ADD, email, domain)
}

pub(crate) fn stop_list_remove(email: &str, domain: &str) -> Result<RequestDescriptor> {
    stop_list_change(STOP_LIST_REMOVE, email, domain)
}

/// The sender for stop-list changes is always `info@{domain}`.
fn stop_list_change(
    endpoint: &'static str,
    email: &str,
    domain: &str,
) -> Result<RequestDescriptor> {
    email::validate(email)?;
    let mail_from = format!("info@{domain}");
    email::validate(&mail_from)?;
    RequestDescriptor::new(
        Method::POST,
        endpoint,
        &StopListPayload { email, mail_from },
    )
}

pub(crate) fn domains() -> Result<RequestDescriptor> {
    RequestDescriptor::new(Method::GET, DOMAINS, &Map::new())
}

pub(crate) fn domain_add(domain: &str) -> Result<RequestDescriptor> {
    RequestDescriptor::new(Method::POST, DOMAIN_ADD, &DomainPayload { domain })
}

pub(crate) fn domain_remove(domain: &str) -> Result<RequestDescriptor> {
    RequestDescriptor::new(Method::POST, DOMAIN_REMOVE, &DomainPayload { domain })
}

pub(crate) fn domain_verify(domain: &str) -> Result<RequestDescriptor> {
    RequestDescriptor::new(Method::POST, DOMAIN_VERIFY, &DomainPayload { domain })
}
