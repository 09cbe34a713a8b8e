//! Keyword tables per language standard.
//!
//! Tables are built by successive union: each `add_*` function layers a
//! standard's additions onto its predecessor's table. The C++ tables map
//! the alternative operator spellings (`and`, `bitor`, ...) directly to
//! punctuator kinds; the lexer marks those tokens `ALTERNATE`.

use crate::options::KeywordTable;
use cfe_ir::TokenKind;

fn add(table: &mut KeywordTable, entries: &[(&'static str, TokenKind)]) {
    for &(spelling, kind) in entries {
        table.insert(spelling, kind);
    }
}

pub fn add_c89_keywords(table: &mut KeywordTable) {
    add(
        table,
        &[
            ("auto", TokenKind::KwAuto),
            ("break", TokenKind::KwBreak),
            ("case", TokenKind::KwCase),
            ("char", TokenKind::KwChar),
            ("const", TokenKind::KwConst),
            ("continue", TokenKind::KwContinue),
            ("default", TokenKind::KwDefault),
            ("do", TokenKind::KwDo),
            ("double", TokenKind::KwDouble),
            ("else", TokenKind::KwElse),
            ("enum", TokenKind::KwEnum),
            ("extern", TokenKind::KwExtern),
            ("float", TokenKind::KwFloat),
            ("for", TokenKind::KwFor),
            ("goto", TokenKind::KwGoto),
            ("if", TokenKind::KwIf),
            ("int", TokenKind::KwInt),
            ("long", TokenKind::KwLong),
            ("register", TokenKind::KwRegister),
            ("return", TokenKind::KwReturn),
            ("short", TokenKind::KwShort),
            ("signed", TokenKind::KwSigned),
            ("sizeof", TokenKind::KwSizeof),
            ("static", TokenKind::KwStatic),
            ("struct", TokenKind::KwStruct),
            ("switch", TokenKind::KwSwitch),
            ("typedef", TokenKind::KwTypedef),
            ("union", TokenKind::KwUnion),
            ("unsigned", TokenKind::KwUnsigned),
            ("void", TokenKind::KwVoid),
            ("volatile", TokenKind::KwVolatile),
            ("while", TokenKind::KwWhile),
        ],
    );
}

pub fn add_c99_keywords(table: &mut KeywordTable) {
    add_c89_keywords(table);
    add(
        table,
        &[
            ("_Bool", TokenKind::KwBool),
            ("_Complex", TokenKind::KwComplex),
            ("_Imaginary", TokenKind::KwImaginary),
            ("inline", TokenKind::KwInline),
            ("restrict", TokenKind::KwRestrict),
        ],
    );
}

pub fn add_c11_keywords(table: &mut KeywordTable) {
    add_c99_keywords(table);
    add(
        table,
        &[
            ("_Alignas", TokenKind::KwAlignas),
            ("_Alignof", TokenKind::KwAlignof),
            ("_Atomic", TokenKind::KwAtomic),
            ("_Generic", TokenKind::KwGeneric),
            ("_Noreturn", TokenKind::KwNoreturn),
            ("_Static_assert", TokenKind::KwStaticAssert),
            ("_Thread_local", TokenKind::KwThreadLocal),
        ],
    );
}

pub fn add_cxx98_keywords(table: &mut KeywordTable) {
    add_c89_keywords(table);
    add(
        table,
        &[
            ("and", TokenKind::AmpAmp),
            ("and_eq", TokenKind::AmpEqual),
            ("asm", TokenKind::KwAsm),
            ("bitand", TokenKind::Amp),
            ("bitor", TokenKind::Pipe),
            ("bool", TokenKind::KwBool),
            ("catch", TokenKind::KwCatch),
            ("class", TokenKind::KwClass),
            ("compl", TokenKind::Tilde),
            ("const_cast", TokenKind::KwConstCast),
            ("delete", TokenKind::KwDelete),
            ("dynamic_cast", TokenKind::KwDynamicCast),
            ("explicit", TokenKind::KwExplicit),
            ("export", TokenKind::KwExport),
            ("false", TokenKind::KwFalse),
            ("friend", TokenKind::KwFriend),
            ("inline", TokenKind::KwInline),
            ("mutable", TokenKind::KwMutable),
            ("namespace", TokenKind::KwNamespace),
            ("new", TokenKind::KwNew),
            ("not", TokenKind::Exclaim),
            ("not_eq", TokenKind::ExclaimEqual),
            ("operator", TokenKind::KwOperator),
            ("or", TokenKind::PipePipe),
            ("or_eq", TokenKind::PipeEqual),
            ("private", TokenKind::KwPrivate),
            ("protected", TokenKind::KwProtected),
            ("public", TokenKind::KwPublic),
            ("reinterpret_cast", TokenKind::KwReinterpretCast),
            ("static_cast", TokenKind::KwStaticCast),
            ("template", TokenKind::KwTemplate),
            ("this", TokenKind::KwThis),
            ("throw", TokenKind::KwThrow),
            ("true", TokenKind::KwTrue),
            ("try", TokenKind::KwTry),
            ("typeid", TokenKind::KwTypeid),
            ("typename", TokenKind::KwTypename),
            ("using", TokenKind::KwUsing),
            ("virtual", TokenKind::KwVirtual),
            ("wchar_t", TokenKind::KwWcharT),
            ("__wchar_t", TokenKind::KwWcharT),
            ("xor", TokenKind::Caret),
            ("xor_eq", TokenKind::CaretEqual),
        ],
    );
}

pub fn add_cxx11_keywords(table: &mut KeywordTable) {
    add_cxx98_keywords(table);
    add(
        table,
        &[
            ("alignas", TokenKind::KwAlignas),
            ("alignof", TokenKind::KwAlignof),
            ("char16_t", TokenKind::KwChar16T),
            ("char32_t", TokenKind::KwChar32T),
            ("constexpr", TokenKind::KwConstexpr),
            ("decltype", TokenKind::KwDecltype),
            ("noexcept", TokenKind::KwNoexcept),
            ("nullptr", TokenKind::KwNullptr),
            ("static_assert", TokenKind::KwStaticAssert),
            ("thread_local", TokenKind::KwThreadLocal),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::KeywordTable;

    #[test]
    fn c_tables_nest() {
        let mut c89 = KeywordTable::default();
        add_c89_keywords(&mut c89);
        let mut c11 = KeywordTable::default();
        add_c11_keywords(&mut c11);

        for key in c89.keys() {
            assert!(c11.contains_key(key), "C11 lost C89 keyword {key}");
        }
        assert!(c11.len() > c89.len());
    }

    #[test]
    fn alternative_tokens_map_to_punctuators() {
        let mut table = KeywordTable::default();
        add_cxx98_keywords(&mut table);

        for (spelling, kind) in [
            ("and", TokenKind::AmpAmp),
            ("or", TokenKind::PipePipe),
            ("not", TokenKind::Exclaim),
            ("xor", TokenKind::Caret),
            ("bitand", TokenKind::Amp),
            ("bitor", TokenKind::Pipe),
            ("compl", TokenKind::Tilde),
            ("and_eq", TokenKind::AmpEqual),
            ("or_eq", TokenKind::PipeEqual),
            ("xor_eq", TokenKind::CaretEqual),
            ("not_eq", TokenKind::ExclaimEqual),
        ] {
            assert_eq!(table.get(spelling), Some(&kind));
            assert!(kind.is_punctuation());
        }
    }

    #[test]
    fn wchar_alias() {
        let mut table = KeywordTable::default();
        add_cxx98_keywords(&mut table);
        assert_eq!(table.get("wchar_t"), table.get("__wchar_t"));
    }
}
