#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{MaskConfig, MaskState, format};

// Each byte is one host event; digits and separators are over-represented so
// sessions get past the edit filter.
fuzz_target!(|data: &[u8]| {
    let mut state = MaskState::new(MaskConfig::default());
    for chunk in data.chunks(2) {
        let arg = chunk.get(1).copied().unwrap_or(0) as usize;
        match chunk[0] % 12 {
            0..=4 => {
                state.type_char(char::from(b'0' + (chunk[0] % 10)));
            }
            5 => {
                state.type_char(['.', ',', '$', 'x'][arg % 4]);
            }
            6 => {
                state.backspace();
            }
            7 => {
                state.delete_forward();
            }
            8 => state.set_caret(arg % 24),
            9 => state.select(arg % 24, (arg / 24) % 24),
            10 => {
                if arg % 2 == 0 {
                    state.handle_focus_enter();
                } else {
                    state.handle_focus_leave();
                }
            }
            _ => {
                let text = String::from_utf8_lossy(chunk);
                state.handle_paste(&text);
            }
        }

        assert_eq!(
            state.formatted_value(),
            format(state.raw_value(), state.config())
        );
        assert!(state.display_text().is_char_boundary(state.caret()));
    }
});
