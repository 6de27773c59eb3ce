use std::ops::Range;

/// Number of tasks covered by one navigator marker
pub const NAV_GROUP_SIZE: usize = 5;

/// Number of navigator segments for a list of `len` tasks
pub fn segment_count(len: usize) -> usize {
    len.div_ceil(NAV_GROUP_SIZE)
}

/// Segment containing the task at `index`
pub fn segment_of(index: usize) -> usize {
    index / NAV_GROUP_SIZE
}

/// Task indices covered by `segment`, clipped to the list length
pub fn segment_range(segment: usize, len: usize) -> Range<usize> {
    let start = (segment * NAV_GROUP_SIZE).min(len);
    let end = (start + NAV_GROUP_SIZE).min(len);
    start..end
}

/// First task index of `segment`, `None` past the end of the list
pub fn first_index(segment: usize, len: usize) -> Option<usize> {
    let range = segment_range(segment, len);
    (!range.is_empty()).then_some(range.start)
}
