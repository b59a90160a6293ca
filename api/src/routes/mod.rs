pub mod bot_invoke;
pub mod health_route;
