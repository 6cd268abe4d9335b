//! Vehicle trajectory and pose interpolation.

use serde::{Deserialize, Serialize};

use super::pose::Pose;
use crate::core::math::angle_lerp_deg;
use crate::error::{ExtractError, Result};

/// One recorded vehicle pose with its timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Timestamp in seconds
    pub t: f64,
    /// Recorded pose
    #[serde(flatten)]
    pub pose: Pose,
}

impl TrajectorySample {
    /// Create a new trajectory sample.
    pub fn new(t: f64, pose: Pose) -> Self {
        Self { t, pose }
    }
}

/// Time-ordered vehicle pose track.
///
/// Timestamps are strictly increasing (enforced at construction). Queries
/// outside the recorded span fail with [`ExtractError::OutOfRange`];
/// extrapolation is never performed since it would fabricate geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    /// Build a trajectory from recorded samples.
    ///
    /// Fails if the track is empty or the timestamps are not strictly
    /// increasing.
    pub fn new(samples: Vec<TrajectorySample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(ExtractError::Trajectory("empty pose track".into()));
        }
        for pair in samples.windows(2) {
            if pair[1].t <= pair[0].t {
                return Err(ExtractError::Trajectory(format!(
                    "timestamps not strictly increasing at t={}",
                    pair[1].t
                )));
            }
        }
        Ok(Self { samples })
    }

    /// First recorded timestamp.
    pub fn start_time(&self) -> f64 {
        self.samples[0].t
    }

    /// Last recorded timestamp.
    pub fn end_time(&self) -> f64 {
        self.samples[self.samples.len() - 1].t
    }

    /// Recorded samples, in time order.
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Interpolated pose at time `t`, via binary search for the bracket.
    ///
    /// Position is interpolated linearly; attitude angles take the shortest
    /// arc so a track crossing the -180/180 boundary never snaps through
    /// zero. Prefer [`Trajectory::cursor`] when querying many timestamps in
    /// non-decreasing order.
    pub fn pose_at(&self, t: f64) -> Result<Pose> {
        let index = self.bracket_index(t)?;
        Ok(self.interpolate_at(index, t))
    }

    /// Cursor for amortized sequential lookups.
    pub fn cursor(&self) -> TrajectoryCursor<'_> {
        TrajectoryCursor {
            trajectory: self,
            index: 0,
        }
    }

    fn out_of_range(&self, t: f64) -> ExtractError {
        ExtractError::OutOfRange {
            t,
            first: self.start_time(),
            last: self.end_time(),
        }
    }

    /// Index of the sample starting the bracket containing `t`.
    fn bracket_index(&self, t: f64) -> Result<usize> {
        if t < self.start_time() || t > self.end_time() {
            return Err(self.out_of_range(t));
        }
        // partition_point returns the count of samples with time <= t, so
        // the bracket start is one before that, clamped off the last sample.
        let upper = self.samples.partition_point(|s| s.t <= t);
        Ok((upper - 1).min(self.samples.len().saturating_sub(2)))
    }

    /// Interpolate within the bracket starting at `index`.
    fn interpolate_at(&self, index: usize, t: f64) -> Pose {
        let a = &self.samples[index];
        if self.samples.len() == 1 || t == a.t {
            return a.pose;
        }
        let b = &self.samples[index + 1];
        if t == b.t {
            return b.pose;
        }
        let frac = (t - a.t) / (b.t - a.t);
        Pose {
            x: a.pose.x + frac * (b.pose.x - a.pose.x),
            y: a.pose.y + frac * (b.pose.y - a.pose.y),
            z: a.pose.z + frac * (b.pose.z - a.pose.z),
            roll: angle_lerp_deg(a.pose.roll, b.pose.roll, frac),
            pitch: angle_lerp_deg(a.pose.pitch, b.pose.pitch, frac),
            yaw: angle_lerp_deg(a.pose.yaw, b.pose.yaw, frac),
        }
    }
}

/// Sequential interpolation cursor.
///
/// Scan samples arrive in time order, so instead of a binary search per
/// sample the cursor advances a bracket index monotonically, making each
/// lookup amortized O(1). A query earlier than the current bracket falls
/// back to a binary search to resynchronize.
pub struct TrajectoryCursor<'a> {
    trajectory: &'a Trajectory,
    index: usize,
}

impl TrajectoryCursor<'_> {
    /// Interpolated pose at time `t`.
    pub fn pose_at(&mut self, t: f64) -> Result<Pose> {
        let samples = self.trajectory.samples();
        if t < self.trajectory.start_time() || t > self.trajectory.end_time() {
            return Err(self.trajectory.out_of_range(t));
        }
        if t < samples[self.index].t {
            // Non-monotonic query; resynchronize.
            self.index = self.trajectory.bracket_index(t)?;
        } else {
            while self.index + 2 < samples.len() && samples[self.index + 1].t <= t {
                self.index += 1;
            }
        }
        Ok(self.trajectory.interpolate_at(self.index, t))
    }
}
