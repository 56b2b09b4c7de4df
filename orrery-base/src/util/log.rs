/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of orrery’s dependencies.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every frame/step unless something is wrong.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with("png::") // logs every encoded chunk
        || target.starts_with("rayon_core::")) // thread pool lifecycle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter() {
        assert!(!standard_filter(
            &log::Metadata::builder().target("png::encoder").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder()
                .target("orrery::scene")
                .level(log::Level::Debug)
                .build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder()
                .target("orrery_render::raycaster")
                .level(log::Level::Trace)
                .build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("some_random_crate").build()
        ));
    }
}
