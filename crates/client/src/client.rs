//! HTTP client for the schedule resources
//!
//! Every call is a single request without retries. Transport failures and
//! unexpected statuses surface as [`TimeError::Persistence`] carrying the
//! method, URL, status and the server's error message.

use chrono::NaiveDate;
use clinicdesk_core::{
    errors::{TimeError, TimeResult},
    models::{
        availability::MonthAvailability, daily_override::DailyOverride,
        template::ScheduleTemplate,
    },
    month::YearMonth,
};
use eyre::{eyre, WrapErr};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::config::ClientConfig;

/// Error body the API returns for every failed request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(config: &ClientConfig) -> TimeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Weekly template of a branch, `None` when it has never been saved
    pub async fn get_template(&self, branch_slug: &str) -> TimeResult<Option<ScheduleTemplate>> {
        let url = self.branch_url(branch_slug, "schedule-template");
        let response = self.send(Method::GET, &url, |request| request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(branch = branch_slug, "No schedule template saved yet");
            return Ok(None);
        }

        Ok(Some(read_json(Method::GET, &url, response).await?))
    }

    pub async fn put_template(
        &self,
        branch_slug: &str,
        template: &ScheduleTemplate,
    ) -> TimeResult<ScheduleTemplate> {
        let url = self.branch_url(branch_slug, "schedule-template");
        let response = self
            .send(Method::PUT, &url, |request| request.json(template))
            .await?;

        read_json(Method::PUT, &url, response).await
    }

    /// Overrides of a branch within one calendar month
    pub async fn get_overrides(
        &self,
        branch_slug: &str,
        month: YearMonth,
    ) -> TimeResult<Vec<DailyOverride>> {
        let url = self.branch_url(branch_slug, "schedule-overrides");
        let response = self
            .send(Method::GET, &url, |request| {
                request.query(&[("month", month.to_string())])
            })
            .await?;

        read_json(Method::GET, &url, response).await
    }

    pub async fn put_override(
        &self,
        branch_slug: &str,
        daily_override: &DailyOverride,
    ) -> TimeResult<DailyOverride> {
        let url = self.branch_url(branch_slug, "schedule-overrides");
        let response = self
            .send(Method::PUT, &url, |request| request.json(daily_override))
            .await?;

        read_json(Method::PUT, &url, response).await
    }

    /// Deletes the override of `date`; `false` when there was none
    pub async fn delete_override(&self, branch_slug: &str, date: NaiveDate) -> TimeResult<bool> {
        let url = format!(
            "{}/{}",
            self.branch_url(branch_slug, "schedule-overrides"),
            date.format("%Y-%m-%d")
        );
        let response = self.send(Method::DELETE, &url, |request| request).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(status_error(Method::DELETE, &url, response).await),
        }
    }

    /// Month availability as resolved by the server
    pub async fn get_availability(
        &self,
        branch_slug: &str,
        month: YearMonth,
    ) -> TimeResult<MonthAvailability> {
        let url = self.branch_url(branch_slug, "availability");
        let response = self
            .send(Method::GET, &url, |request| {
                request.query(&[("month", month.to_string())])
            })
            .await?;

        read_json(Method::GET, &url, response).await
    }

    fn branch_url(&self, branch_slug: &str, resource: &str) -> String {
        format!(
            "{}/api/branches/{}/{}",
            self.base_url,
            urlencoding::encode(branch_slug),
            resource
        )
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> TimeResult<Response> {
        debug!(%method, url, "Sending request");
        let response = build(self.http.request(method.clone(), url))
            .send()
            .await
            .wrap_err_with(|| format!("{} {} failed", method, url))?;

        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(method: Method, url: &str, response: Response) -> TimeResult<T> {
    if !response.status().is_success() {
        return Err(status_error(method, url, response).await);
    }

    let value = response
        .json::<T>()
        .await
        .wrap_err_with(|| format!("{} {} returned an unreadable body", method, url))?;

    Ok(value)
}

async fn status_error(method: Method, url: &str, response: Response) -> TimeError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    TimeError::Persistence(eyre!("{} {} returned {}: {}", method, url, status, message))
}
