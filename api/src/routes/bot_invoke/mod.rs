pub mod invoke_request;
pub mod invoke_route;
