use std::io::Write;

use plasma_common::BlockHeader;
use tracing::info;

use crate::error::ClientResult;
use crate::handlers::{write_json, Handler};
use crate::view::{from_hex, HeaderView};

// Decodes a fixed-size block header
pub struct HeaderHandler {
    data: String,
}

impl HeaderHandler {
    pub fn new(data: String) -> Self {
        Self { data }
    }
}

impl Handler for HeaderHandler {
    fn handle(&mut self, out: &mut dyn Write) -> ClientResult<()> {
        let bytes = from_hex(&self.data)?;
        let header = BlockHeader::decode(&bytes)?;
        info!(block = %header.block_number(), "Decoded block header");
        write_json(out, &HeaderView::from(&header))
    }
}
