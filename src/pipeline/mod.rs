// Poll pipeline: fetch → dedupe → deliver, once per scheduler tick.

pub mod poll;
