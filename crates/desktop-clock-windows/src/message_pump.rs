use windows::Win32::UI::WindowsAndMessaging::{DispatchMessageW, GetMessageW, MSG, TranslateMessage};

/// The Win32 message pump. Blocks until WM_QUIT is received and returns
/// the exit code it carried.
///
/// `GetMessageW` returns -1 on failure; that ends the loop as well
/// rather than spinning.
pub(crate) fn run_message_pump() -> i32 {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 > 0 {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    msg.wParam.0 as i32
}
