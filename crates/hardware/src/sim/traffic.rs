//! Deterministic traffic generation and read-back verification.
//!
//! Each enabled port gets a stream that alternates write-then-read over a
//! small address region, honoring the one-outstanding-request handshake.
//! Every read completion is checked against the byte the stream previously
//! wrote, which closes the loop over the controller, the byte-lane muxing,
//! and the device model. The two video ports run in lockstep off one stream
//! configuration so the merge path sees steady traffic.

use std::collections::HashMap;

use crate::config::TrafficConfig;
use crate::ctrl::port::{Port, Ports};

/// Per-port data pattern: a function of port and address so that lane mixups
/// surface as mismatches instead of coincidental matches.
fn pattern(port: Port, addr: u32) -> u8 {
    let salt = match port {
        Port::Program => 0x11,
        Port::Work => 0x29,
        Port::Battery => 0x47,
        Port::Audio => 0x5B,
        Port::VideoA => 0x73,
        Port::VideoB | Port::VideoMerged => 0x8D,
    };
    (addr as u8).wrapping_mul(31).wrapping_add(salt)
}

#[derive(Clone, Copy, Debug)]
struct Outstanding {
    addr: u32,
    we: bool,
}

#[derive(Clone, Copy, Debug)]
struct Stream {
    port: Port,
    period: u64,
    region: u32,
    next_addr: u32,
    write_next: bool,
    outstanding: Option<Outstanding>,
}

impl Stream {
    fn new(port: Port, period: u64, region: u32) -> Self {
        Self {
            port,
            period,
            region: region.max(1),
            next_addr: 0,
            write_next: true,
            outstanding: None,
        }
    }
}

/// Drives request streams into the controller's ports and verifies reads.
#[derive(Debug, Default)]
pub struct TrafficGenerator {
    streams: Vec<Stream>,
    written: HashMap<(Port, u32), u8>,
    /// Requests posted.
    pub issued: u64,
    /// Acknowledged completions observed.
    pub completed: u64,
    /// Read completions checked against an earlier write.
    pub verified: u64,
    /// Read completions that did not match the written byte.
    pub mismatches: u64,
}

impl TrafficGenerator {
    /// Builds streams from the traffic configuration.
    pub fn new(config: &TrafficConfig) -> Self {
        let mut streams = Vec::new();
        let entries = [
            (Port::Program, &config.program),
            (Port::Work, &config.work),
            (Port::Battery, &config.battery),
            (Port::Audio, &config.audio),
            (Port::VideoA, &config.video),
            (Port::VideoB, &config.video),
        ];
        for (port, pt) in entries {
            if pt.enabled && pt.period > 0 {
                streams.push(Stream::new(port, pt.period, pt.region));
            }
        }
        Self {
            streams,
            ..Self::default()
        }
    }

    /// Observes completions and posts new requests for the given tick.
    /// Call once per tick, before advancing the simulator.
    pub fn tick(&mut self, now: u64, ports: &mut Ports) {
        for i in 0..self.streams.len() {
            let stream = self.streams[i];

            if let Some(out) = stream.outstanding {
                let ch = ports.channel(stream.port);
                if !ch.pending() {
                    self.completed += 1;
                    if !out.we {
                        if let Some(&expected) = self.written.get(&(stream.port, out.addr)) {
                            self.verified += 1;
                            if ch.rdata != expected {
                                self.mismatches += 1;
                            }
                        }
                    }
                    self.streams[i].outstanding = None;
                }
            }

            let stream = self.streams[i];
            if stream.outstanding.is_none() && now % stream.period == 0 {
                let addr = stream.next_addr % stream.region;
                let we = stream.write_next;
                let data = pattern(stream.port, addr);
                if ports.channel_mut(stream.port).request(addr, data, we) {
                    self.issued += 1;
                    if we {
                        let _ = self.written.insert((stream.port, addr), data);
                    } else {
                        // Read phase done; move to the next address.
                        self.streams[i].next_addr = stream.next_addr.wrapping_add(1);
                    }
                    self.streams[i].write_next = !we;
                    self.streams[i].outstanding = Some(Outstanding { addr, we });
                }
            }
        }
    }
}
