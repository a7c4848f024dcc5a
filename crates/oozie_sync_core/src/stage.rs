use std::fmt;

/// Steps of one incremental pass, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassStage {
    Init,
    LoadWatermark,
    FetchSource,
    FilterAndEmit,
    AdvanceWatermark,
    PersistWatermark,
    Done,
}

impl PassStage {
    pub const ORDER: [PassStage; 7] = [
        PassStage::Init,
        PassStage::LoadWatermark,
        PassStage::FetchSource,
        PassStage::FilterAndEmit,
        PassStage::AdvanceWatermark,
        PassStage::PersistWatermark,
        PassStage::Done,
    ];

    /// The stage that follows this one; `None` once the pass is done.
    pub fn next(self) -> Option<PassStage> {
        match self {
            PassStage::Init => Some(PassStage::LoadWatermark),
            PassStage::LoadWatermark => Some(PassStage::FetchSource),
            PassStage::FetchSource => Some(PassStage::FilterAndEmit),
            PassStage::FilterAndEmit => Some(PassStage::AdvanceWatermark),
            PassStage::AdvanceWatermark => Some(PassStage::PersistWatermark),
            PassStage::PersistWatermark => Some(PassStage::Done),
            PassStage::Done => None,
        }
    }
}

impl fmt::Display for PassStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassStage::Init => "init",
            PassStage::LoadWatermark => "load watermark",
            PassStage::FetchSource => "fetch source",
            PassStage::FilterAndEmit => "filter and emit",
            PassStage::AdvanceWatermark => "advance watermark",
            PassStage::PersistWatermark => "persist watermark",
            PassStage::Done => "done",
        };
        f.write_str(name)
    }
}
