/// Use mimalloc as the global allocator.
/// Loading a large input allocates one line-slice vector plus the
/// scratch buffers of the merge and radix passes; mimalloc keeps those cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod shuffle;

pub use common::{io_error_msg, reset_sigpipe};
