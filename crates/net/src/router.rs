use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};

/// Merges per-route components into one router and attaches the shared state.
pub fn main_router<STATE>(components: Vec<(String, Router<STATE>)>, state: STATE) -> Router
where
    STATE: Clone + Send + Sync + 'static,
{
    let mut app = Router::<STATE>::new();

    for (_, router) in components {
        app = app.merge(router);
    }

    app.with_state(state)
}

pub fn get_router_builder<T, S>(
    path: &str,
    handler: impl Handler<T, S> + Clone + Send + 'static,
) -> (String, Router<S>)
where
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    (path.to_string(), Router::<S>::new().route(path, get(handler)))
}

pub fn post_router_builder<T, S>(
    path: &str,
    handler: impl Handler<T, S> + Clone + Send + 'static,
) -> (String, Router<S>)
where
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    (path.to_string(), Router::<S>::new().route(path, post(handler)))
}
