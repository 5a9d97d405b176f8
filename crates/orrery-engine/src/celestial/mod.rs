pub mod body;
pub mod comet;
pub mod comet_rain;
pub mod composer;
pub mod config;
pub mod description;
pub mod flyby;
pub mod orbit;
