use chrono::{DateTime, Local, TimeZone};

/// Source of "now" for every day-relative computation.
///
/// The returned instant carries a full timezone, not just the offset in force
/// right now, so history entries on the other side of a DST change still land
/// on their own local day and hour.
pub trait Clock: Send + Sync {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant, in whatever zone it was built with.
#[derive(Debug, Clone)]
pub struct FixedClock<Z: TimeZone>(pub DateTime<Z>);

impl<Z> Clock for FixedClock<Z>
where
    Z: TimeZone + Send + Sync,
    Z::Offset: Send + Sync,
{
    type Tz = Z;

    fn now(&self) -> DateTime<Z> {
        self.0.clone()
    }
}
