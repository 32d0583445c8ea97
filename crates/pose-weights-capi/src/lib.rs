#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Exposes the sequential and the parallel weight update over a plain C
//! record of raw buffers. The matching header, `pose_weights.h`, is written
//! by the build script.

use std::ffi::{c_int, c_uint};
use std::panic::{catch_unwind, AssertUnwindSafe};

use pose_weights::{
    update_weights_parallel, update_weights_sequential, ExecutionStrategy, ScoringParams,
    WeightBatch, WeightError,
};

/// Success.
pub const PW_OK: c_int = 0;
/// A buffer length does not match N or F.
pub const PW_ERR_MISMATCHED_LENGTHS: c_int = -1;
/// A non-empty buffer is null.
pub const PW_ERR_NULL_BUFFER: c_int = -2;
/// The scoring parameters are invalid.
pub const PW_ERR_INVALID_PARAMS: c_int = -3;
/// The parallel runtime could not be set up.
pub const PW_ERR_PARALLEL: c_int = -4;
/// The computation panicked; no weight was written.
pub const PW_ERR_PANIC: c_int = -5;

/// Raw batch record, laid out as in `pose_weights.h`.
///
/// Buffers are row-major: `wp` N, `xp` N×7 (`[qw, qx, qy, qz, tx, ty, tz]`),
/// `camera_params` 3×3, `image_points` F×2, `world_points` F×3.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct System {
    /// Output weights.
    pub wp: *mut f64,
    /// Pose records.
    pub xp: *const f64,
    /// Camera intrinsics.
    pub camera_params: *const f64,
    /// Observed pixels.
    pub image_points: *const f64,
    /// World points.
    pub world_points: *const f64,
    /// Number of hypotheses.
    pub n: c_uint,
    /// Number of correspondences.
    pub f: c_uint,
}

/// Reinterpret a flat row-major buffer of `len` records of `W` doubles.
///
/// # Safety
///
/// `ptr` must be null or valid for reads of `len * W` doubles for `'a`.
unsafe fn records<'a, const W: usize>(
    ptr: *const f64,
    len: usize,
    name: &'static str,
) -> Result<&'a [[f64; W]], WeightError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(WeightError::NullBuffer(name));
    }
    // [f64; W] has the size of W doubles and the alignment of one
    Ok(std::slice::from_raw_parts(ptr.cast::<[f64; W]>(), len))
}

fn status(err: &WeightError) -> c_int {
    match err {
        WeightError::MismatchedLengths { .. } => PW_ERR_MISMATCHED_LENGTHS,
        WeightError::NullBuffer(_) => PW_ERR_NULL_BUFFER,
        WeightError::InvalidLossParameter { .. } | WeightError::InvalidMinDepth(_) => {
            PW_ERR_INVALID_PARAMS
        }
        WeightError::InvalidThreadCount(_)
        | WeightError::InvalidChunkSize(_)
        | WeightError::ThreadPoolBuild(_) => PW_ERR_PARALLEL,
    }
}

/// Score into a scratch buffer and copy it to `wp` only once every weight is known.
///
/// # Safety
///
/// See [`updateWeights_cpu`].
unsafe fn run<F>(input: &System, update: F) -> c_int
where
    F: FnOnce(&mut WeightBatch<'_>) -> Result<(), WeightError>,
{
    let n = input.n as usize;
    let f = input.f as usize;

    let prepared = (|| {
        let poses = records::<7>(input.xp, n, "xp")?;
        let image_points = records::<2>(input.image_points, f, "imagePoints")?;
        let world_points = records::<3>(input.world_points, f, "worldPoints")?;
        let intrinsics = records::<3>(input.camera_params, 3, "cameraParams")?;
        if n > 0 && input.wp.is_null() {
            return Err(WeightError::NullBuffer("wp"));
        }
        Ok((poses, image_points, world_points, intrinsics))
    })();

    let (poses, image_points, world_points, intrinsics) = match prepared {
        Ok(buffers) => buffers,
        Err(e) => {
            log::warn!("weight update rejected: {e}");
            return status(&e);
        }
    };
    let intrinsics = [intrinsics[0], intrinsics[1], intrinsics[2]];

    let mut scratch = vec![0.0; n];
    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut batch = WeightBatch::new(
            &mut scratch,
            poses,
            &intrinsics,
            image_points,
            world_points,
        );
        update(&mut batch)
    }));

    match result {
        Ok(Ok(())) => {
            if n > 0 {
                std::ptr::copy_nonoverlapping(scratch.as_ptr(), input.wp, n);
            }
            PW_OK
        }
        Ok(Err(e)) => {
            log::warn!("weight update failed: {e}");
            status(&e)
        }
        Err(_) => {
            log::warn!("weight update panicked");
            PW_ERR_PANIC
        }
    }
}

/// Update the weights sequentially with the default scoring parameters.
///
/// Returns [`PW_OK`] on success or a negative `PW_ERR_*` code; on error `wp`
/// is left untouched.
///
/// # Memory
///
/// Unlike the in-place Rust scorer, this entry point allocates N doubles of
/// scratch space. Weights are scored into it and copied to `wp` only after
/// every hypothesis succeeded, so neither an error nor a panic leaves `wp`
/// partially written. [`updateWeights_gpu`] does the same.
///
/// # Safety
///
/// Every non-null pointer must be valid for the number of doubles given in
/// [`System`], `wp` must be writable and must not alias the inputs.
/// `camera_params` must always point to 9 doubles.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn updateWeights_cpu(input: System) -> c_int {
    let params = ScoringParams::default();
    run(&input, |batch| update_weights_sequential(batch, &params))
}

/// Update the weights on the Rayon thread pool with the default scoring parameters.
///
/// The name is kept for existing C callers; the work runs on CPU threads.
///
/// # Safety
///
/// Same contract as [`updateWeights_cpu`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn updateWeights_gpu(input: System) -> c_int {
    let params = ScoringParams::default();
    run(&input, |batch| {
        update_weights_parallel(batch, &params, ExecutionStrategy::PerHypothesis)
    })
}
