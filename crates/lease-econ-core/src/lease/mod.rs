//! Commercial lease economics: the landlord's view of a deal.
//!
//! A deal is projected month by month ([`cash_flow`]), then priced for
//! brokerage ([`commission`]), tenant concessions ([`concessions`]) and
//! cost recovery ([`payback`]). [`economics`] discounts the result into
//! NPV and Net Effective Rent.

pub mod cash_flow;
pub mod commission;
pub mod concessions;
pub mod deal;
pub mod economics;
pub mod form;
pub mod payback;
pub mod schedule;

pub use deal::{CommissionModel, DealParameters, FreeRentBasis};
pub use economics::{analyze_lease, compute_lease_economics, LeaseEconomicsOutput};
pub use payback::Payback;
pub use schedule::{Escalation, RentSchedule};
