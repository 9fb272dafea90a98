/// Ordered substitution table neutralizing Leaf control syntax in
/// converted HTML. Order matters: `#(` is a prefix of none of the later
/// directive tokens, but each entry must be applied globally before the
/// next so a directive opener is replaced exactly once.
const ESCAPE_TABLE: &[(&str, &str)] = &[
    // closing bracket ends a Leaf block early
    ("}", "\\}"),
    // comment tokens
    ("#//", "&num;//"),
    ("#/*", "&num;/*"),
    // directive tokens
    ("#(", "&num;("),
    ("#count(", "&num;count("),
    ("#for(", "&num;for("),
    ("#if(", "&num;if("),
    ("#set(", "&num;set("),
    ("#embed(", "&num;embed("),
    ("#date(", "&num;date("),
    ("#capitalize(", "&num;capitalize("),
    ("#contains(", "&num;contains("),
    ("#lowercase(", "&num;lowercase("),
    ("#uppercase(", "&num;uppercase("),
];

/// Replace every Leaf control sequence with an inert substitute so the
/// text can be embedded in a template body verbatim. Total and
/// deterministic; applies the table entries as sequential global literal
/// passes, never as one combined pattern.
pub fn escape_leaf_syntax(text: &str) -> String {
    let mut out = text.to_string();
    for (token, substitute) in ESCAPE_TABLE {
        out = out.replace(token, substitute);
    }
    out
}
