use types::SkeletonFrame;

/// Stands in for the out-of-scope depth-camera SDK wrapper (spec.md §1's
/// "Acquisition of skeletons"). The engine's driver loop only ever needs
/// the next frame, synchronously; how a concrete implementor gets there
/// (a camera SDK callback queue, a recorded file, a synthetic generator)
/// is none of the engine's concern.
pub trait SkeletonSource {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<SkeletonFrame>;
}
