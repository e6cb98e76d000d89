/// Full player identifier: base plus 2-digit suffix.
/// Example: `engelcu01`
pub type PlayerId = String;
/// Base identifier before suffix disambiguation (5 last-name chars + 2 first-name chars).
/// Example: `engelcu`
pub type BaseId = String;
/// Short team code as it appears in the scraped tables.
/// Examples: `AUR`, `CUC`, `MARN`
pub type TeamCode = String;
/// Four-digit season year.
/// Example: `2014`
pub type Season = u16;
/// Post-correction display name, first and last joined with one space.
/// Example: `Garrett Balind`
pub type FullName = String;
/// Passthrough statistic column name.
/// Examples: `ab`, `hr`, `era`
pub type StatColumn = String;
/// Raw statistic cell value, carried through the pipeline untouched.
/// Examples: `37`, `0.412`
pub type StatValue = String;
