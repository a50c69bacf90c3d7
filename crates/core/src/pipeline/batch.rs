//! Grouped concurrent fetching of campaign open events.

use futures::future;
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::engagement::{AccessToken, Campaign, EngagementApi, EngagementError, RawOpenEvent};
use crate::report::{parse_event_date, OpenEvent, ReportWindow};

use super::isolate;

/// Runs per-campaign fetches in fixed-size groups with a pause between
/// groups, capping instantaneous concurrency against the upstream API
/// independently of the per-call rate limiter.
pub struct BatchScheduler {
    batch_size: usize,
    batch_pause: Duration,
}

impl BatchScheduler {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            batch_pause: Duration::from_millis(config.batch_pause_ms),
        }
    }

    /// Fetch and normalize open events for every campaign.
    ///
    /// Group N+1 never starts before group N has fully completed and the
    /// inter-group pause has elapsed. Results are flattened in group order;
    /// a failing campaign contributes zero events and nothing else.
    pub async fn fetch_batch(
        &self,
        api: &dyn EngagementApi,
        token: &AccessToken,
        campaigns: &[Campaign],
        window: &ReportWindow,
    ) -> Vec<OpenEvent> {
        let groups: Vec<_> = campaigns.chunks(self.batch_size).collect();
        let total_groups = groups.len();
        let mut events = Vec::new();

        for (index, group) in groups.into_iter().enumerate() {
            debug!(
                group = index + 1,
                total_groups,
                campaigns = group.len(),
                "fetching campaign group"
            );

            let fetches = group
                .iter()
                .map(|campaign| self.fetch_one(api, token, campaign, window));
            for group_events in future::join_all(fetches).await {
                events.extend(group_events);
            }

            if index + 1 < total_groups {
                sleep(self.batch_pause).await;
            }
        }

        debug!(events = events.len(), "batch fetch complete");
        events
    }

    /// One campaign's fetch, isolated: any failure is logged and yields
    /// zero events for this campaign only.
    async fn fetch_one(
        &self,
        api: &dyn EngagementApi,
        token: &AccessToken,
        campaign: &Campaign,
        window: &ReportWindow,
    ) -> Vec<OpenEvent> {
        isolate("campaign", &campaign.id, async {
            let raw = api.fetch_opens(token, &campaign.id).await?;
            Ok::<_, EngagementError>(normalize_events(campaign, &raw, window))
        })
        .await
    }
}

/// Filter raw events to the window and attach campaign identity.
/// Events with unparseable timestamps are dropped.
fn normalize_events(
    campaign: &Campaign,
    raw: &[RawOpenEvent],
    window: &ReportWindow,
) -> Vec<OpenEvent> {
    raw.iter()
        .filter_map(|event| {
            let day = parse_event_date(&event.visited_at_raw)?;
            if !window.contains(day) {
                return None;
            }
            Some(OpenEvent {
                campaign_id: campaign.id.clone(),
                campaign_name: campaign.name.clone(),
                prospect_email: event.prospect_email.clone(),
                source_page: event.source_page.clone(),
                visited_at: day,
            })
        })
        .collect()
}
