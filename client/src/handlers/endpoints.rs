use std::io::Write;

use plasma_common::{ClientConfig, Network};
use serde::Serialize;

use crate::error::ClientResult;
use crate::handlers::{write_json, Handler};

#[derive(Serialize, Debug)]
struct EndpointsView<'a> {
    network: Network,
    api_base: &'a str,
    list_utxos: String,
}

// Reports where the client would talk to for the active network
pub struct EndpointsHandler {
    config: ClientConfig,
}

impl EndpointsHandler {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Handler for EndpointsHandler {
    fn handle(&mut self, out: &mut dyn Write) -> ClientResult<()> {
        let view = EndpointsView {
            network: self.config.network,
            api_base: self.config.api_base(),
            list_utxos: self.config.list_utxos_url(),
        };
        write_json(out, &view)
    }
}
