//! Backend entities as the dashboard consumes them
//!
//! The backend owns every invariant on these records. Fields are optional or
//! defaulted so that a partially populated JSON document still renders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Entity identifier as issued by the backend
pub type EntityId = String;

/// Parse a timestamp leniently: RFC 3339, a bare date, or nothing at all.
///
/// Anything unparseable becomes `None` instead of failing the whole document.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Parse the timestamp formats the backend is known to emit
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept numbers that arrive either as JSON numbers or numeric strings
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Dashboard timeframe filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    /// No time restriction
    #[default]
    #[serde(rename = "all")]
    All,
    /// Current calendar month
    #[serde(rename = "month")]
    Month,
    /// Last three months
    #[serde(rename = "3months")]
    ThreeMonths,
    /// Last six months
    #[serde(rename = "6months")]
    SixMonths,
}

impl Timeframe {
    /// Every timeframe, in the order the filter menu lists them
    pub const ALL: [Self; 4] = [Self::All, Self::Month, Self::ThreeMonths, Self::SixMonths];

    /// Query-string value understood by the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Month => "This Month",
            Self::ThreeMonths => "Last 3 Months",
            Self::SixMonths => "Last 6 Months",
        }
    }

    /// Parse a query-string value, falling back to [`Timeframe::All`]
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "month" => Self::Month,
            "3months" => Self::ThreeMonths,
            "6months" => Self::SixMonths,
            _ => Self::All,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending/resolved tab used by the AMC and complaint queues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueTab {
    /// Work still open
    #[default]
    Pending,
    /// Work closed out
    Resolved,
}

impl QueueTab {
    /// Parse a query-string value, falling back to [`QueueTab::Pending`]
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "resolved" {
            Self::Resolved
        } else {
            Self::Pending
        }
    }

    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

/// Staff member reference embedded in leads and requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffRef {
    /// Staff identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Contact email
    pub email: Option<String>,
}

/// Customer reference embedded in leads, requests and complaints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerRef {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Short name
    pub name: Option<String>,
    /// Full name as captured at booking
    pub full_name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
}

/// Lead summary embedded in AMC requests and complaints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadRef {
    /// Lead identifier
    pub id: Option<EntityId>,
    /// Customer name on the booking
    pub full_name: Option<String>,
    /// Project type (Residential, Commercial, ...)
    pub project_type: Option<String>,
    /// Staff assigned to the booking
    pub assigned_staff: Option<StaffRef>,
}

/// One installation workflow step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadStep {
    /// Step identifier (synthesised for steps the backend has not created)
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Step label
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Position; 1-based in the backend, 0-based after merging
    pub order: Option<u32>,
    /// Whether the step has been signed off
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
    /// Days past the step's due date
    pub due_days: Option<u32>,
}

/// Short complaint record attached to a lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadComplaint {
    /// Complaint identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Complaint text
    pub message: Option<String>,
    /// Status string
    pub status: Option<String>,
}

/// Short AMC record attached to a lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadAmcRequest {
    /// Request identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Request note
    pub note: Option<String>,
    /// Status string
    pub status: Option<String>,
}

/// A booking and its workflow state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lead {
    /// Lead identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Human readable booking code
    pub booking_code: Option<String>,
    /// When the booking was created
    #[serde(deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// Customer name on the booking
    pub full_name: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Project type
    pub project_type: Option<String>,
    /// System size in kW
    #[serde(rename = "sizedKW", deserialize_with = "lenient_f64")]
    pub sized_kw: Option<f64>,
    /// Panel provider
    pub provider: Option<String>,
    /// Investment before GST
    #[serde(deserialize_with = "lenient_f64")]
    pub total_investment: Option<f64>,
    /// GST percentage
    #[serde(deserialize_with = "lenient_f64")]
    pub gst_pct: Option<f64>,
    /// GST amount
    #[serde(deserialize_with = "lenient_f64")]
    pub gst_amount: Option<f64>,
    /// Customer's monthly electricity bill
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_bill: Option<f64>,
    /// Rate per kW
    #[serde(rename = "ratePerKW", deserialize_with = "lenient_f64")]
    pub rate_per_kw: Option<f64>,
    /// Number of plates
    pub plates: Option<serde_json::Value>,
    /// Panel wattage
    pub wp: Option<serde_json::Value>,
    /// Address line
    pub address: Option<String>,
    /// Street
    pub street: Option<String>,
    /// City
    pub city: Option<String>,
    /// State
    pub state: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// Completion percentage computed by the backend
    #[serde(deserialize_with = "lenient_f64")]
    pub percent: Option<f64>,
    /// Whether the booking claims a subsidy
    #[serde(deserialize_with = "null_as_default")]
    pub with_subsidy: bool,
    /// Workflow status
    pub status: Option<String>,
    /// Assigned staff member
    pub assigned_staff: Option<StaffRef>,
    /// Owning customer
    pub customer: Option<CustomerRef>,
    /// Workflow steps
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<LeadStep>,
    /// Complaints raised against this booking
    #[serde(deserialize_with = "null_as_default")]
    pub complaints: Vec<LeadComplaint>,
    /// AMC requests raised against this booking
    #[serde(deserialize_with = "null_as_default")]
    pub amc_requests: Vec<LeadAmcRequest>,
}

impl Lead {
    /// Customer name, preferring the booking's own field
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        non_empty(self.full_name.as_deref()).or_else(|| {
            self.customer.as_ref().and_then(|c| {
                non_empty(c.full_name.as_deref()).or_else(|| non_empty(c.name.as_deref()))
            })
        })
    }

    /// Contact phone, preferring the booking's own field
    #[must_use]
    pub fn contact_phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
            .or_else(|| self.customer.as_ref().and_then(|c| non_empty(c.phone.as_deref())))
    }

    /// Contact email, preferring the booking's own field
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
            .or_else(|| self.customer.as_ref().and_then(|c| non_empty(c.email.as_deref())))
    }

    /// Investment plus GST
    #[must_use]
    pub fn total_with_gst(&self) -> f64 {
        self.total_investment.unwrap_or(0.0) + self.gst_amount.unwrap_or(0.0)
    }

    /// Address parts that are present, joined with commas
    #[must_use]
    pub fn full_address(&self) -> String {
        [
            &self.address,
            &self.street,
            &self.city,
            &self.state,
            &self.zip,
        ]
        .into_iter()
        .filter_map(|part| non_empty(part.as_deref()))
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Whether the lead is assigned to the given staff member
    #[must_use]
    pub fn is_assigned_to(&self, staff_id: &str) -> bool {
        self.assigned_staff.as_ref().is_some_and(|s| s.id == staff_id)
    }
}

/// Booking summary attached to a customer record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerLead {
    /// Lead identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Project type
    pub project_type: Option<String>,
    /// Completion percentage
    #[serde(deserialize_with = "lenient_f64")]
    pub percent: Option<f64>,
    /// Creation time
    #[serde(deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal customer link (referrer or downline)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerLink {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Mobile number
    #[serde(deserialize_with = "null_as_default")]
    pub mobile: String,
}

/// Customer wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Current balance
    #[serde(deserialize_with = "lenient_f64")]
    pub balance: Option<f64>,
}

/// App customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Mobile number used to sign in
    #[serde(deserialize_with = "null_as_default")]
    pub mobile: String,
    /// Display name
    pub name: Option<String>,
    /// City
    pub city: Option<String>,
    /// State
    pub state: Option<String>,
    /// Own referral code
    pub referral_code: Option<String>,
    /// Level in the referral network
    #[serde(deserialize_with = "null_as_default")]
    pub level: u32,
    /// Sign-up time
    #[serde(deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// Bookings made by the customer
    #[serde(deserialize_with = "null_as_default")]
    pub leads: Vec<CustomerLead>,
    /// Customer who referred this one
    pub referred_by_customer: Option<CustomerLink>,
    /// Direct referrals
    #[serde(deserialize_with = "null_as_default")]
    pub downlines: Vec<CustomerLink>,
    /// Wallet, when one exists
    pub wallet: Option<Wallet>,
}

/// Field staff member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Staff {
    /// Staff identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Role title
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    /// Availability (Active, On Leave, Busy)
    pub status: Option<String>,
    /// Rating out of five
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Joining date, preformatted by the backend
    pub joined_date: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Emergency contact
    pub emergency_contact: Option<String>,
}

/// New staff member form, posted verbatim to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStaff {
    /// Display name
    pub name: String,
    /// Sign-in email
    pub email: String,
    /// Phone number (optional)
    #[serde(default)]
    pub phone: String,
    /// Initial password
    pub password: String,
}

/// Annual maintenance contract request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmcRequest {
    /// Request identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// pending, `in_progress`, rejected or resolved
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Customer's note
    pub note: Option<String>,
    /// When the request was raised
    #[serde(deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the request was resolved
    #[serde(deserialize_with = "lenient_datetime")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Requesting customer
    pub customer: Option<CustomerRef>,
    /// Booking the request concerns
    pub lead: Option<LeadRef>,
    /// Staff member handling the request
    pub assigned_staff: Option<StaffRef>,
}

impl AmcRequest {
    /// Customer name with the dashboard's fallback chain
    #[must_use]
    pub fn customer_name(&self) -> &str {
        display_customer(self.customer.as_ref(), self.lead.as_ref())
    }

    /// Project type, or `Unknown`
    #[must_use]
    pub fn project_type(&self) -> &str {
        self.lead
            .as_ref()
            .and_then(|l| non_empty(l.project_type.as_deref()))
            .unwrap_or(UNKNOWN)
    }

    /// Whether the request is assigned to the given staff member
    #[must_use]
    pub fn is_assigned_to(&self, staff_id: &str) -> bool {
        self.assigned_staff.as_ref().is_some_and(|s| s.id == staff_id)
    }
}

/// Customer complaint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Complaint {
    /// Complaint identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// pending, `in_progress` or resolved
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Complaint text
    pub message: Option<String>,
    /// critical, high, medium or low
    pub severity: Option<String>,
    /// When the complaint was raised
    #[serde(deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// Complaining customer
    pub customer: Option<CustomerRef>,
    /// Booking the complaint concerns
    pub lead: Option<LeadRef>,
}

impl Complaint {
    /// Complaints carry no category; every one is shown under this label
    pub const TYPE_LABEL: &'static str = "General Issue";

    /// Customer name with the dashboard's fallback chain
    #[must_use]
    pub fn customer_name(&self) -> &str {
        display_customer(self.customer.as_ref(), self.lead.as_ref())
    }
}

/// Placeholder for missing names and types
pub const UNKNOWN: &str = "Unknown";

fn display_customer<'a>(customer: Option<&'a CustomerRef>, lead: Option<&'a LeadRef>) -> &'a str {
    customer
        .and_then(|c| non_empty(c.name.as_deref()))
        .or_else(|| lead.and_then(|l| non_empty(l.full_name.as_deref())))
        .unwrap_or(UNKNOWN)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Headline counters on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    /// Bookings at 100%
    #[serde(deserialize_with = "null_as_default")]
    pub completed_bookings: u64,
    /// All bookings
    #[serde(deserialize_with = "null_as_default")]
    pub total_bookings: u64,
    /// Workflow steps signed off across all bookings
    #[serde(deserialize_with = "null_as_default")]
    pub total_steps_completed: u64,
    /// Complaints not yet resolved
    #[serde(deserialize_with = "null_as_default")]
    pub unresolved_complaints: u64,
    /// AMC requests not yet resolved
    #[serde(rename = "pendingAMC")]
    #[serde(deserialize_with = "null_as_default")]
    pub pending_amc: u64,
    /// Steps past their due date
    #[serde(deserialize_with = "null_as_default")]
    pub overdue_steps: u64,
}

/// Analytics headline cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsCards {
    /// Booking count
    pub bookings: Option<u64>,
    /// Package types on offer
    pub packages: Option<u64>,
    /// Gross revenue
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue: Option<f64>,
    /// City with the most bookings
    pub hot_destinations: Option<String>,
}

/// A labelled value for line charts (`{month, value}` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphPoint {
    /// X-axis label
    #[serde(alias = "month", alias = "label")]
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    /// Y value
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

/// Project count by type (`{type, count}` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectShare {
    /// Project type
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub project_type: String,
    /// Number of bookings
    #[serde(deserialize_with = "null_as_default")]
    pub count: f64,
}

/// Analytics document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Analytics {
    /// Headline cards
    #[serde(deserialize_with = "null_as_default")]
    pub cards: AnalyticsCards,
    /// Revenue per month
    pub graph: Option<Vec<GraphPoint>>,
    /// Bookings per project type
    #[serde(deserialize_with = "null_as_default")]
    pub project_distribution: Vec<ProjectShare>,
}

/// Per-month booking activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// Month label
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    /// New bookings
    #[serde(deserialize_with = "null_as_default")]
    pub bookings: f64,
    /// Workflow steps signed off
    #[serde(deserialize_with = "null_as_default")]
    pub completed_steps: f64,
    /// Bookings with subsidy
    #[serde(deserialize_with = "null_as_default")]
    pub subsidy: f64,
    /// Bookings without subsidy
    #[serde(deserialize_with = "null_as_default")]
    pub non_subsidy: f64,
}

/// Project stage breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectStages {
    /// Monthly rows
    pub monthly_data: Option<Vec<MonthlyActivity>>,
}

/// Upline reference of a referral user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferralUpline {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Phone number
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
}

/// Downline counts per tier (A1 is direct referrals)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownlineCounts {
    /// Tier 1
    #[serde(deserialize_with = "null_as_default")]
    pub a1: u64,
    /// Tier 2
    #[serde(deserialize_with = "null_as_default")]
    pub a2: u64,
    /// Tier 3
    #[serde(deserialize_with = "null_as_default")]
    pub a3: u64,
    /// Tier 4
    #[serde(deserialize_with = "null_as_default")]
    pub a4: u64,
    /// Tier 5
    #[serde(deserialize_with = "null_as_default")]
    pub a5: u64,
}

impl DownlineCounts {
    /// Counts in tier order
    #[must_use]
    pub const fn tiers(&self) -> [u64; REFERRAL_TIERS] {
        [self.a1, self.a2, self.a3, self.a4, self.a5]
    }
}

/// Number of commission tiers in the referral network
pub const REFERRAL_TIERS: usize = 5;

/// A member of the referral network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferralUser {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Phone number
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    /// Own referral code
    #[serde(deserialize_with = "null_as_default")]
    pub referral_code: String,
    /// Who referred this member
    pub upline: Option<ReferralUpline>,
    /// Total referrals across tiers
    #[serde(deserialize_with = "null_as_default")]
    pub total_referrals: u64,
    /// Commission earned
    #[serde(deserialize_with = "lenient_f64")]
    pub earnings: Option<f64>,
    /// Downline size per tier
    #[serde(deserialize_with = "null_as_default")]
    pub downline: DownlineCounts,
}

/// Commission settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferralSettings {
    /// Cap on total payout, percent
    #[serde(deserialize_with = "max_payout_or_default")]
    pub max_payout_percent: f64,
    /// Commission per tier, percent
    #[serde(deserialize_with = "level_percents_or_default")]
    pub level_percents: Vec<f64>,
}

const DEFAULT_MAX_PAYOUT_PERCENT: f64 = 10.0;
const DEFAULT_LEVEL_PERCENT: f64 = 2.0;

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            max_payout_percent: DEFAULT_MAX_PAYOUT_PERCENT,
            level_percents: vec![DEFAULT_LEVEL_PERCENT; REFERRAL_TIERS],
        }
    }
}

fn max_payout_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.unwrap_or(DEFAULT_MAX_PAYOUT_PERCENT))
}

fn level_percents_or_default<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<f64>>::deserialize(deserializer)?
        .unwrap_or_else(|| vec![DEFAULT_LEVEL_PERCENT; REFERRAL_TIERS]))
}

impl ReferralSettings {
    /// Percent for a 0-based tier; missing tiers read as zero
    #[must_use]
    pub fn level_percent(&self, tier: usize) -> f64 {
        self.level_percents.get(tier).copied().unwrap_or(0.0)
    }
}

/// New members per month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkGrowth {
    /// Month label
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    /// Direct (A1) joins
    #[serde(deserialize_with = "null_as_default")]
    pub direct: f64,
    /// Indirect (A2+) joins
    #[serde(deserialize_with = "null_as_default")]
    pub indirect: f64,
}

/// Referral network overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferralOverview {
    /// Members in the network
    #[serde(deserialize_with = "null_as_default")]
    pub total_network: u64,
    /// Members active recently
    #[serde(deserialize_with = "null_as_default")]
    pub active_users: u64,
    /// Commission paid out
    #[serde(deserialize_with = "lenient_f64")]
    pub total_earnings: Option<f64>,
    /// Commission settings; missing settings use the defaults
    #[serde(deserialize_with = "settings_or_default")]
    pub settings: ReferralSettings,
    /// Growth series
    #[serde(deserialize_with = "null_as_default")]
    pub network_growth: Vec<NetworkGrowth>,
    /// Highest earning referrers
    #[serde(deserialize_with = "null_as_default")]
    pub top_referrers: Vec<ReferralUser>,
}

fn settings_or_default<'de, D>(deserializer: D) -> Result<ReferralSettings, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ReferralSettings>::deserialize(deserializer)?.unwrap_or_default())
}

/// Month labels used for the empty growth series
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Default for ReferralOverview {
    fn default() -> Self {
        Self {
            total_network: 0,
            active_users: 0,
            total_earnings: Some(0.0),
            settings: ReferralSettings::default(),
            network_growth: MONTHS
                .iter()
                .map(|month| NetworkGrowth {
                    month: (*month).to_string(),
                    direct: 0.0,
                    indirect: 0.0,
                })
                .collect(),
            top_referrers: Vec::new(),
        }
    }
}

/// One member in a detailed downline column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownlineMember {
    /// Customer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntityId,
    /// Phone number
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    /// Join date, preformatted by the backend
    #[serde(deserialize_with = "null_as_default")]
    pub joined_at: String,
}

/// Members per tier for one referral user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedDownline {
    /// Tier 1
    #[serde(deserialize_with = "null_as_default")]
    pub a1: Vec<DownlineMember>,
    /// Tier 2
    #[serde(deserialize_with = "null_as_default")]
    pub a2: Vec<DownlineMember>,
    /// Tier 3
    #[serde(deserialize_with = "null_as_default")]
    pub a3: Vec<DownlineMember>,
    /// Tier 4
    #[serde(deserialize_with = "null_as_default")]
    pub a4: Vec<DownlineMember>,
    /// Tier 5
    #[serde(deserialize_with = "null_as_default")]
    pub a5: Vec<DownlineMember>,
}

impl DetailedDownline {
    /// Member lists in tier order
    #[must_use]
    pub fn tiers(&self) -> [&[DownlineMember]; REFERRAL_TIERS] {
        [&self.a1, &self.a2, &self.a3, &self.a4, &self.a5]
    }
}

/// Referral user details response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralUserDetails {
    /// Downline members per tier
    #[serde(deserialize_with = "null_as_default")]
    pub downline: DetailedDownline,
}

/// Admin notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Notification identifier
    pub id: serde_json::Value,
    /// Title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Body
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// When the event happened
    #[serde(deserialize_with = "lenient_datetime")]
    pub time: Option<DateTime<Utc>>,
    /// Not yet seen
    #[serde(deserialize_with = "null_as_default")]
    pub unread: bool,
    /// Badge colour
    pub color: Option<String>,
    /// Badge glyph
    pub icon: Option<String>,
}

/// Broadcast request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    /// Customer identifiers to message
    pub recipients: Vec<EntityId>,
    /// Message text
    pub message: String,
    /// Local `{date}T{time}` schedule, or null to send now
    pub scheduled_at: Option<String>,
}

/// Customer projected for the broadcast recipient picker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastRecipient {
    /// Customer identifier
    pub id: EntityId,
    /// Display name
    pub full_name: String,
    /// Phone number
    pub phone: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
}

impl BroadcastRecipient {
    /// Project a customer; customers without a phone number are dropped
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        let phone = customer.mobile.trim();
        if phone.is_empty() {
            return None;
        }
        Some(Self {
            id: customer.id.clone(),
            full_name: non_empty(customer.name.as_deref())
                .map_or_else(|| format!("Customer {phone}"), ToString::to_string),
            phone: phone.to_string(),
            city: non_empty(customer.city.as_deref())
                .unwrap_or(UNKNOWN)
                .to_string(),
            state: customer.state.clone().unwrap_or_default(),
        })
    }
}
