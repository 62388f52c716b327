use mathbox_disasm::alu::{expression, Function, Source};
use mathbox_disasm::disasm::{disasm_word, LOAD_ADDRESS_MARKER};
use mathbox_disasm::fields::Fields;
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_depends_only_on_word(word in 0u32..0x100_0000) {
        prop_assert_eq!(Fields::decode(word), Fields::decode(word));
        prop_assert_eq!(disasm_word(word, None), disasm_word(word, None));
    }

    #[test]
    fn sequence_flags(word in 0u32..0x100_0000) {
        let fields = Fields::decode(word);
        prop_assert_eq!(fields.eos(), fields.h || (fields.j && !fields.s));
        prop_assert_eq!(fields.show_y(), fields.h || (fields.j && fields.s));
        prop_assert_eq!(fields.jump.is_some(), fields.l);
    }

    #[test]
    fn selects_stay_in_range(word in 0u32..0x100_0000) {
        let fields = Fields::decode(word);
        prop_assert!(fields.sh < 8 && fields.sl < 8);
        // bit 12 and 13 are shared by both selects
        prop_assert_eq!(fields.sh & 3, fields.sl & 3);
    }

    #[test]
    fn every_word_renders(word in 0u32..0x100_0000, latch in proptest::option::of(any::<u8>())) {
        let instr = disasm_word(word, latch);
        prop_assert_eq!(instr.flags.len(), 3);
        prop_assert_eq!(instr.jump.len(), 9);
        prop_assert!(
            instr.function == LOAD_ADDRESS_MARKER || instr.function.ends_with(')'),
            "{}",
            instr.function
        );
    }

    #[test]
    fn expressions_never_empty(
        f in 0u8..8,
        s in 0u8..8,
        a in 0u8..16,
        b in 0u8..16,
        c in any::<bool>(),
    ) {
        let text = expression(Function::from_bits(f), Source::from_bits(s), a, b, c);
        prop_assert!(!text.is_empty());
    }
}
