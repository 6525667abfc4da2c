/// ## Machine back end
///
/// Screen coordinates are 0-based. `read_line` and `get_char` return `None`
/// when nothing is available yet; the runtime then reports `Event::Input`
/// and retries the same statement on the next `execute`.
pub trait Device {
    fn print_string(&mut self, s: &str);
    fn clear(&mut self);
    fn set_cursor_x(&mut self, x: i64);
    fn set_cursor_y(&mut self, y: i64);
    fn plot(&mut self, _x: i64, _y: i64) {}
    fn render(&mut self) {}
    fn read_line(&mut self) -> Option<String>;
    fn get_char(&mut self) -> Option<char>;
    /// The program ended.
    fn halt(&mut self) {}
}
