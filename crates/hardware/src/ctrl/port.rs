//! Requester ports and the toggle handshake.
//!
//! Each external requester talks to the controller through one
//! [`RequestChannel`]: a single-slot mailbox carrying address, write data,
//! write enable, and the request/acknowledge toggle pair. A requester flips
//! its request toggle to post work; the controller flips the acknowledge
//! toggle to match when the access completes. A port may have at most one
//! outstanding request, enforced here by an explicit busy guard rather than
//! by the caller comparing toggles.

/// Identity of a pipeline-stage owner.
///
/// The first six variants are the external requesters; [`Port::VideoMerged`]
/// is a pseudo-port tagging a slot-2 transaction that services both video
/// requesters in one 16-bit access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// Read-mostly program store (banks 0/1).
    Program,
    /// Small read/write work store.
    Work,
    /// Battery-backed store.
    Battery,
    /// Audio store.
    Audio,
    /// Video store, low byte lane when merged.
    VideoA,
    /// Video store, high byte lane when merged.
    VideoB,
    /// Both video stores serviced as one 16-bit transaction.
    VideoMerged,
}

impl Port {
    /// The six external requesters, in slot-0 priority order first.
    pub const REQUESTERS: [Self; 6] = [
        Self::Program,
        Self::Work,
        Self::Battery,
        Self::Audio,
        Self::VideoA,
        Self::VideoB,
    ];
}

/// One requester's port: request state plus the output data register.
///
/// The toggle pair is modeled directly so that tests can observe the
/// acknowledge flip, which is the only externally visible completion signal.
#[derive(Clone, Debug, Default)]
pub struct RequestChannel {
    /// Linear address of the posted request (width varies by store).
    pub addr: u32,
    /// Write data for the posted request.
    pub wdata: u8,
    /// Direction of the posted request (`true` = write).
    pub we: bool,
    /// Output data register, updated at completion.
    pub rdata: u8,
    req: bool,
    ack: bool,
}

impl RequestChannel {
    /// Returns whether a request is outstanding (toggles mismatch).
    #[inline]
    pub fn pending(&self) -> bool {
        self.req != self.ack
    }

    /// Posts a request by flipping the request toggle.
    ///
    /// Returns `false` without side effects if a request is still
    /// outstanding; issuing on a busy port is undefined at the hardware
    /// level, so the software model simply refuses it.
    pub fn request(&mut self, addr: u32, wdata: u8, we: bool) -> bool {
        if self.pending() {
            return false;
        }
        self.addr = addr;
        self.wdata = wdata;
        self.we = we;
        self.req = !self.req;
        true
    }

    /// Current acknowledge toggle, for observing completion edges.
    #[inline]
    pub fn ack_toggle(&self) -> bool {
        self.ack
    }

    /// Completes the outstanding request: latches the output data and flips
    /// the acknowledge toggle to match the request toggle.
    pub(crate) fn complete(&mut self, data: u8) {
        self.rdata = data;
        self.ack = self.req;
    }
}

/// The six request channels, one per external requester.
#[derive(Clone, Debug, Default)]
pub struct Ports {
    /// Program store channel.
    pub program: RequestChannel,
    /// Work store channel.
    pub work: RequestChannel,
    /// Battery store channel.
    pub battery: RequestChannel,
    /// Audio store channel.
    pub audio: RequestChannel,
    /// Video store A channel.
    pub video_a: RequestChannel,
    /// Video store B channel.
    pub video_b: RequestChannel,
}

impl Ports {
    /// Returns the channel for an external requester.
    ///
    /// # Panics
    ///
    /// Panics on [`Port::VideoMerged`], which has no channel of its own.
    pub fn channel(&self, port: Port) -> &RequestChannel {
        match port {
            Port::Program => &self.program,
            Port::Work => &self.work,
            Port::Battery => &self.battery,
            Port::Audio => &self.audio,
            Port::VideoA => &self.video_a,
            Port::VideoB => &self.video_b,
            Port::VideoMerged => unreachable!("merged pseudo-port has no channel"),
        }
    }

    /// Mutable access to the channel for an external requester.
    ///
    /// # Panics
    ///
    /// Panics on [`Port::VideoMerged`], which has no channel of its own.
    pub fn channel_mut(&mut self, port: Port) -> &mut RequestChannel {
        match port {
            Port::Program => &mut self.program,
            Port::Work => &mut self.work,
            Port::Battery => &mut self.battery,
            Port::Audio => &mut self.audio,
            Port::VideoA => &mut self.video_a,
            Port::VideoB => &mut self.video_b,
            Port::VideoMerged => unreachable!("merged pseudo-port has no channel"),
        }
    }
}
