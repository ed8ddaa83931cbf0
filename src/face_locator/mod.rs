pub mod impl_fake;
pub mod impl_rustface;
pub mod interface;

#[cfg(test)]
mod test;
