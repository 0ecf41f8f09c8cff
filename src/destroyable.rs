/// Breaks `Rc` cycles created by channel subscriptions; call before dropping
/// the last external handle.
pub trait Destroyable {
    fn destroy(&mut self);
}
