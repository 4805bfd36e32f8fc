use std::os::raw::c_void;

pub(crate) type MecabHandle = *mut c_void;
