mod campaigns_create;
mod scheduler_parse_schedule;
mod status_get;

pub use self::{
    campaigns_create::campaigns_create, scheduler_parse_schedule::scheduler_parse_schedule,
    status_get::status_get,
};
