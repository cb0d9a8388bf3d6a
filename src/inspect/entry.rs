/// One key of the top-level dict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelEntry {
    pub key: String,
    /// Value tag: `string`, `integer`, `array`, `dict`, `true`, `false`, ...
    pub kind: String,
    /// Present for inline and boolean values; block values have none.
    pub value: Option<String>,
}
