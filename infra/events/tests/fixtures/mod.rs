/// Stand-in for a registration lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountCreated(pub u64);

/// Stand-in for a queued admin mail job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailJob(pub u64);
