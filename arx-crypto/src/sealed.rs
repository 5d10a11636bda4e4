pub trait Sealed {}

pub trait AadSealed {}
