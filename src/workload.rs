//! Locality-controlled trace generators.
//!
//! Each generator yields a lazy, finite sequence of [`TraceRecord`]s shaped to
//! give a cache model a predictable hit-rate profile. Stochastic generators
//! draw from an injected [`RandomSource`]; the spatial and large-loop
//! generators are fully deterministic.

use crate::core::{Address, TraceRecord, BLOCK_SIZE};
use crate::random::RandomSource;

/// Locality pattern a trace is generated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Pattern {
    /// Stride equals block size: every access touches a new block (~0% hits).
    Sequential,
    /// Uniform draws over a 64 MB region (~0% hits).
    Random,
    /// Five hot addresses reused forever (~100% hits).
    Temporal,
    /// Eight words per block before moving on (87.5% hits).
    Spatial,
    /// 64 KB loop: misses a 32 KB L1, fits L2.
    #[value(name = "largeloop")]
    LargeLoop,
    /// Normally distributed addresses around a hot center.
    Gaussian,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Sequential,
        Pattern::Random,
        Pattern::Temporal,
        Pattern::Spatial,
        Pattern::LargeLoop,
        Pattern::Gaussian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Sequential => "sequential",
            Pattern::Random => "random",
            Pattern::Temporal => "temporal",
            Pattern::Spatial => "spatial",
            Pattern::LargeLoop => "largeloop",
            Pattern::Gaussian => "gaussian",
        }
    }

    /// Output file written by the batch run.
    pub fn default_file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    /// Builds this pattern's generator with default parameters.
    pub fn records<'a, R>(
        self,
        count: usize,
        rng: &'a mut R,
    ) -> Box<dyn Iterator<Item = TraceRecord> + 'a>
    where
        R: RandomSource + ?Sized,
    {
        match self {
            Pattern::Sequential => Box::new(sequential(&SequentialConfig::default(), count, rng)),
            Pattern::Random => Box::new(uniform_random(&RandomConfig::default(), count, rng)),
            Pattern::Temporal => Box::new(temporal(&TemporalConfig::default(), count, rng)),
            Pattern::Spatial => Box::new(spatial(&SpatialConfig::default(), count)),
            Pattern::LargeLoop => Box::new(large_loop(&LargeLoopConfig::default(), count)),
            Pattern::Gaussian => Box::new(gaussian(&GaussianConfig::default(), count, rng)),
        }
    }
}

/// Sequential sweep parameters.
#[derive(Clone, Debug)]
pub struct SequentialConfig {
    pub base: Address,
    /// Address delta between consecutive records.
    pub stride: u64,
    pub store_probability: f64,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            base: 0x1000,
            stride: BLOCK_SIZE,
            store_probability: 0.2,
        }
    }
}

/// Uniform-random universe: `num_slots` block-aligned slots starting at 0.
#[derive(Clone, Debug)]
pub struct RandomConfig {
    pub num_slots: u64,
    pub store_probability: f64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            num_slots: 0x100000,
            store_probability: 0.3,
        }
    }
}

/// Hot set of `hot_set_size` addresses, `stride` bytes apart.
#[derive(Clone, Debug)]
pub struct TemporalConfig {
    pub base: Address,
    pub stride: u64,
    pub hot_set_size: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            base: 0x1000,
            stride: 0x1000,
            hot_set_size: 5,
        }
    }
}

impl TemporalConfig {
    pub fn working_set(&self) -> Vec<Address> {
        (0..self.hot_set_size as u64)
            .map(|i| self.base + i * self.stride)
            .collect()
    }
}

/// Word-by-word walk through consecutive blocks.
#[derive(Clone, Debug)]
pub struct SpatialConfig {
    pub base: Address,
    /// Bytes per access; `BLOCK_SIZE / word_size` accesses share a block.
    pub word_size: u64,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            base: 0x50000,
            word_size: 8,
        }
    }
}

impl SpatialConfig {
    pub fn words_per_block(&self) -> u64 {
        (BLOCK_SIZE / self.word_size.max(1)).max(1)
    }
}

/// Repeated sweep over `num_blocks` consecutive blocks.
#[derive(Clone, Debug)]
pub struct LargeLoopConfig {
    pub base: Address,
    pub num_blocks: u64,
}

impl Default for LargeLoopConfig {
    fn default() -> Self {
        Self {
            base: 0x20000,
            num_blocks: 1024,
        }
    }
}

impl LargeLoopConfig {
    /// Bytes covered by one sweep.
    pub fn span_bytes(&self) -> u64 {
        self.num_blocks * BLOCK_SIZE
    }
}

/// Normal distribution of raw addresses, in bytes.
#[derive(Clone, Debug)]
pub struct GaussianConfig {
    pub mean: f64,
    pub sigma: f64,
    pub store_probability: f64,
}

impl Default for GaussianConfig {
    fn default() -> Self {
        Self {
            mean: 0x80000 as f64,
            sigma: (1000 * BLOCK_SIZE) as f64,
            store_probability: 0.2,
        }
    }
}

fn access(store: bool, address: Address) -> TraceRecord {
    if store {
        TraceRecord::store(address)
    } else {
        TraceRecord::load(address)
    }
}

/// Truncates a raw sample toward zero, floors it to a block boundary and
/// clamps negatives to 0. NaN maps to 0; out-of-range values saturate.
pub fn align_address(raw: f64) -> Address {
    let block = BLOCK_SIZE as i64;
    let truncated = raw as i64;
    let aligned = truncated.div_euclid(block) * block;
    aligned.max(0) as Address
}

/// Monotonic sweep from `base`, one stride per record.
pub fn sequential<'a, R>(
    config: &SequentialConfig,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = TraceRecord> + 'a
where
    R: RandomSource + ?Sized,
{
    let SequentialConfig {
        base,
        stride,
        store_probability,
    } = config.clone();
    (0..count as u64).map(move |i| {
        let store = rng.chance(store_probability);
        access(store, base.wrapping_add(i.wrapping_mul(stride)))
    })
}

/// Independent uniform draws over the slot universe, scaled to blocks.
pub fn uniform_random<'a, R>(
    config: &RandomConfig,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = TraceRecord> + 'a
where
    R: RandomSource + ?Sized,
{
    let RandomConfig {
        num_slots,
        store_probability,
    } = config.clone();
    let count = if num_slots == 0 { 0 } else { count };
    (0..count).map(move |_| {
        let store = rng.chance(store_probability);
        let slot = rng.uniform_int(0, num_slots - 1);
        access(store, slot * BLOCK_SIZE)
    })
}

/// Loads drawn uniformly from the hot working set.
pub fn temporal<'a, R>(
    config: &TemporalConfig,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = TraceRecord> + 'a
where
    R: RandomSource + ?Sized,
{
    let working_set = config.working_set();
    let count = if working_set.is_empty() { 0 } else { count };
    (0..count).map(move |_| {
        let pick = rng.uniform_int(0, working_set.len() as u64 - 1) as usize;
        TraceRecord::load(working_set[pick])
    })
}

/// Loads walking every word of a block before advancing to the next block.
pub fn spatial(config: &SpatialConfig, count: usize) -> impl Iterator<Item = TraceRecord> {
    let base = config.base;
    let word_size = config.word_size;
    let per_block = config.words_per_block();
    (0..count as u64).map(move |i| {
        let word_offset = (i % per_block) * word_size;
        let block_offset = (i / per_block) * BLOCK_SIZE;
        TraceRecord::load(base + block_offset + word_offset)
    })
}

/// Loads sweeping the block range in order, restarting at `base` after each
/// full pass. The last pass may stop mid-range.
pub fn large_loop(config: &LargeLoopConfig, count: usize) -> impl Iterator<Item = TraceRecord> {
    let base = config.base;
    let num_blocks = config.num_blocks;
    let count = if num_blocks == 0 { 0 } else { count };
    (0..count as u64).map(move |i| TraceRecord::load(base + (i % num_blocks) * BLOCK_SIZE))
}

/// Block-aligned addresses sampled from a normal distribution.
pub fn gaussian<'a, R>(
    config: &GaussianConfig,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = TraceRecord> + 'a
where
    R: RandomSource + ?Sized,
{
    let GaussianConfig {
        mean,
        sigma,
        store_probability,
    } = config.clone();
    (0..count).map(move |_| {
        let store = rng.chance(store_probability);
        access(store, align_address(rng.gauss(mean, sigma)))
    })
}
