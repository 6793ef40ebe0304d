use chrono::NaiveDate;

use crate::core::errors::{ActlogError, Result};
use crate::core::models::filter::{FilterClause, LogFilter, Pagination};
use crate::core::models::host::{Capability, RequestContext};
use crate::core::models::log_entry::NO_ACTOR;
use crate::core::models::log_page::{LogPage, LogQuery, LogRow};
use crate::core::traits::host::HostDirectory;
use crate::core::traits::log_store::LogStore;

/// Name shown for rows whose actor no longer exists.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// Turn operator-supplied filter values into a `LogFilter`.
///
/// Blank values are ignored. A username that matches no user yields a
/// filter on the sentinel actor id, i.e. an empty result, not an error.
pub fn build_filter<H: HostDirectory + ?Sized>(
    host: &H,
    start_date: Option<&str>,
    end_date: Option<&str>,
    username: Option<&str>,
) -> Result<LogFilter> {
    let mut filter = LogFilter::all();

    if let Some(start) = non_blank(start_date).map(parse_day).transpose()? {
        filter = filter.and(FilterClause::CreatedOnOrAfter(start));
    }
    if let Some(end) = non_blank(end_date).map(parse_day).transpose()? {
        filter = filter.and(FilterClause::CreatedOnOrBefore(end));
    }

    if let Some(login) = non_blank(username) {
        let actor_id = match host.user_by_login(login) {
            Some(actor) => actor.id,
            None => {
                log::debug!("no user with login '{login}', filter will match nothing");
                NO_ACTOR
            }
        };
        filter = filter.and(FilterClause::Actor(actor_id));
    }

    Ok(filter)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ActlogError::InvalidFilter {
        detail: format!("invalid date '{s}'"),
    })
}

/// Permission-gated, paginated read side of the activity log.
pub struct LogBrowser<'a, S: LogStore + ?Sized, H: HostDirectory + ?Sized> {
    store: &'a S,
    host: &'a H,
}

impl<'a, S: LogStore + ?Sized, H: HostDirectory + ?Sized> LogBrowser<'a, S, H> {
    pub fn new(store: &'a S, host: &'a H) -> Self {
        Self { store, host }
    }

    /// Fetch one page of the log for the actor in `ctx`.
    ///
    /// Fails with `PermissionDenied` before touching the store unless the
    /// actor can manage options.
    pub fn browse(&self, ctx: &RequestContext, query: LogQuery) -> Result<LogPage> {
        let allowed = ctx
            .actor
            .as_ref()
            .is_some_and(|a| a.can(Capability::ManageOptions));
        if !allowed {
            return Err(ActlogError::PermissionDenied);
        }

        let filter = build_filter(
            self.host,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            query.username.as_deref(),
        )?;
        let pagination = Pagination::new(query.page);

        let total = self.store.count(&filter)?;
        let entries = self
            .store
            .query(&filter, pagination.per_page, pagination.offset())?;

        let rows = entries
            .into_iter()
            .map(|entry| {
                let actor_name = self
                    .host
                    .user_by_id(entry.actor_id)
                    .map(|a| a.login)
                    .unwrap_or_else(|| UNKNOWN_ACTOR.to_string());
                LogRow { entry, actor_name }
            })
            .collect();

        Ok(LogPage {
            query: LogQuery {
                page: Some(pagination.page),
                ..query
            },
            rows,
            current_page: pagination.page,
            total,
            total_pages: pagination.total_pages(total),
        })
    }
}
