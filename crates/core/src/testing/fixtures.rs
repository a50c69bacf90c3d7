//! Test fixtures.

use crate::engagement::{Campaign, RawOpenEvent};
use crate::report::ReportWindow;
use crate::tenants::Tenant;

/// A tenant whose credentials are derived from a short prefix:
/// id `<p>@account.example`, client id `cid-<p>`, reporting email
/// `<p>@client.example`.
pub fn tenant(prefix: &str) -> Tenant {
    Tenant {
        id: format!("{}@account.example", prefix),
        client_id: format!("cid-{}", prefix),
        client_secret: format!("sec-{}", prefix),
        report_email: format!("{}@client.example", prefix),
    }
}

pub fn campaign(id: &str, name: &str) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn open_event(prospect_email: &str, visited_at: &str) -> RawOpenEvent {
    RawOpenEvent {
        prospect_email: prospect_email.to_string(),
        source_page: format!("https://linkedin.com/in/{}", prospect_email),
        visited_at_raw: visited_at.to_string(),
    }
}

/// The window 01/03/2024 – 31/03/2024.
pub fn march_2024_window() -> ReportWindow {
    ReportWindow::parse("01/03/2024", "31/03/2024").unwrap()
}
