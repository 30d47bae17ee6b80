pub mod drilldown;
pub mod group;
pub mod header;
pub mod util;
