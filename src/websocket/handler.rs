use axum::{
    extract::{ConnectInfo, State, ws::WebSocketUpgrade},
    response::Response,
};
use std::{net::SocketAddr, sync::Arc};

use crate::{state::AppState, utils::address::remote_address, websocket::connection::handle_socket};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let address = remote_address(addr);
    ws.on_upgrade(move |socket| handle_socket(socket, state, address))
}
