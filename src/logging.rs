//! Browser console logging through the `log` facade.

use log::LevelFilter;

/// Route `log` records to the browser console. Later calls only adjust the
/// level.
pub fn init(filter: LevelFilter) {
    let Some(level) = filter.to_level() else {
        log::set_max_level(LevelFilter::Off);
        return;
    };
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(filter);
    }
}
