#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{MaskConfig, format, is_numeric, sanitize_paste};

fuzz_target!(|data: &[u8]| {
    let Ok(clipboard) = std::str::from_utf8(data) else {
        return;
    };
    let config = MaskConfig::default();
    if let Some(raw) = sanitize_paste(clipboard, &config) {
        assert!(is_numeric(&raw, &config), "sanitized {raw:?} from {clipboard:?}");
        let formatted = format(Some(&raw), &config);
        let again = sanitize_paste(&formatted, &config);
        assert_eq!(
            again.as_deref().map(|r| format(Some(r), &config)),
            Some(formatted),
            "format is not stable through paste for {clipboard:?}"
        );
    }
});
