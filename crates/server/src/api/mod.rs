mod handlers;
mod routes;
mod stream;

pub use routes::create_router;
