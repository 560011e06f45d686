//! NSIS plugin glue
//!
//! The exported `extractall` / `extractfile` functions, the host's string
//! stack, and the installer window's log list and status line.
//!
//! Unicode NSIS only: every host string is UTF-16.

use std::ffi::{c_int, c_void};
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use log::error;
use windows_sys::Win32::Foundation::{HWND, LPARAM};
use windows_sys::Win32::System::Memory::{GlobalAlloc, GlobalFree, GPTR};
use windows_sys::Win32::UI::Controls::{
    LVIF_TEXT, LVITEMW, LVM_ENSUREVISIBLE, LVM_GETITEMCOUNT, LVM_INSERTITEMW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    FindWindowExW, GetDlgItem, SendMessageW, SetWindowTextW,
};

use crate::driver;
use crate::platform::{utf16_to_utf8, utf8_to_utf16};
use crate::report::Reporter;
use crate::stack::HostStack;

/// Window class of the installer's inner dialog.
pub const DIALOG_CLASS: &str = "#32770";
/// Window class of the details list.
pub const LIST_CLASS: &str = "SysListView32";
/// Control id of the status line inside the dialog.
pub const STATUS_CONTROL_ID: i32 = 1006;

/// Result pushed when the driver panicked.
const INTERNAL_ERROR: &str = "Internal error in zipdll";

/// One node of the host's string stack.
#[repr(C)]
pub struct StackT {
    pub next: *mut StackT,
    pub text: [u16; 1],
}

/// The host stack, borrowed for one call.
pub struct NsisStack {
    top: *mut *mut StackT,
    string_size: usize,
}

impl NsisStack {
    /// # Safety
    ///
    /// `top` must be the stack pointer the host passed to this call and
    /// stay valid while the value is alive.
    pub unsafe fn new(top: *mut *mut StackT, string_size: c_int) -> Option<Self> {
        if top.is_null() {
            return None;
        }
        Some(Self {
            top,
            string_size: string_size.max(1) as usize,
        })
    }
}

impl HostStack for NsisStack {
    fn pop(&mut self) -> Option<String> {
        unsafe {
            let node = *self.top;
            if node.is_null() {
                return None;
            }
            let text = ptr::addr_of!((*node).text) as *const u16;
            let mut len = 0;
            while *text.add(len) != 0 {
                len += 1;
            }
            let value = utf16_to_utf8(std::slice::from_raw_parts(text, len));
            *self.top = (*node).next;
            GlobalFree(node as _);
            Some(value)
        }
    }

    fn push(&mut self, value: &str) {
        let wide = utf8_to_utf16(value);
        // same cut-off as the host's own lstrcpyn
        let units = (wide.len() - 1).min(self.string_size - 1);
        let bytes = mem::size_of::<StackT>() + self.string_size * mem::size_of::<u16>();
        unsafe {
            let node = GlobalAlloc(GPTR, bytes) as *mut StackT;
            if node.is_null() {
                error!("GlobalAlloc failed; result not pushed");
                return;
            }
            let text = ptr::addr_of_mut!((*node).text) as *mut u16;
            ptr::copy_nonoverlapping(wide.as_ptr(), text, units);
            // GPTR zeroes the block, so the terminator is already there
            (*node).next = *self.top;
            *self.top = node;
        }
    }
}

/// Log list and status line of the running installer.
#[derive(Debug, Clone, Copy)]
pub struct HostWindows {
    dialog: HWND,
    list: HWND,
}

impl HostWindows {
    /// Find the dialog and its list view below `parent`.
    ///
    /// A silent installer has no parent window; nothing is searched then.
    pub fn discover(parent: HWND) -> Self {
        let mut found = Self { dialog: 0, list: 0 };
        if parent == 0 {
            return found;
        }
        let dialog_class = utf8_to_utf16(DIALOG_CLASS);
        let list_class = utf8_to_utf16(LIST_CLASS);
        unsafe {
            found.dialog = FindWindowExW(parent, 0, dialog_class.as_ptr(), ptr::null());
            if found.dialog != 0 {
                found.list = FindWindowExW(found.dialog, 0, list_class.as_ptr(), ptr::null());
            }
        }
        found
    }
}

impl Reporter for HostWindows {
    fn log_message(&mut self, text: &str) {
        if self.list == 0 {
            return;
        }
        let mut wide = utf8_to_utf16(text);
        unsafe {
            let count = SendMessageW(self.list, LVM_GETITEMCOUNT, 0, 0);
            let mut item: LVITEMW = mem::zeroed();
            item.mask = LVIF_TEXT;
            item.pszText = wide.as_mut_ptr();
            item.cchTextMax = wide.len() as i32;
            item.iItem = count as i32;
            SendMessageW(
                self.list,
                LVM_INSERTITEMW,
                0,
                &item as *const LVITEMW as LPARAM,
            );
            SendMessageW(self.list, LVM_ENSUREVISIBLE, item.iItem as usize, 0);
        }
    }

    fn set_status(&mut self, text: &str) {
        if self.dialog != 0 {
            unsafe {
                let ctrl = GetDlgItem(self.dialog, STATUS_CONTROL_ID);
                if ctrl != 0 {
                    let wide = utf8_to_utf16(text);
                    SetWindowTextW(ctrl, wide.as_ptr());
                }
            }
        }
        self.log_message(text);
    }
}

type Driver = fn(&mut NsisStack, &mut HostWindows);

unsafe fn run_export(
    driver: Driver,
    hwnd_parent: HWND,
    string_size: c_int,
    stacktop: *mut *mut StackT,
) {
    let Some(mut stack) = NsisStack::new(stacktop, string_size) else {
        return;
    };
    let mut ui = HostWindows::discover(hwnd_parent);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| driver(&mut stack, &mut ui)));
    if outcome.is_err() {
        error!("driver panicked");
        stack.push(INTERNAL_ERROR);
    }
}

/// `ZipDLL::extractall [/TRANSLATE t1..t8] source destination`
///
/// # Safety
///
/// Called by the NSIS host with its own window, string size and stack.
#[no_mangle]
pub unsafe extern "C" fn extractall(
    hwnd_parent: HWND,
    string_size: c_int,
    _variables: *mut u16,
    stacktop: *mut *mut StackT,
    _extra: *mut c_void,
) {
    run_export(
        |stack, ui| driver::extract_all(stack, ui),
        hwnd_parent,
        string_size,
        stacktop,
    );
}

/// `ZipDLL::extractfile [/TRANSLATE t1..t8] source destination file`
///
/// # Safety
///
/// Called by the NSIS host with its own window, string size and stack.
#[no_mangle]
pub unsafe extern "C" fn extractfile(
    hwnd_parent: HWND,
    string_size: c_int,
    _variables: *mut u16,
    stacktop: *mut *mut StackT,
    _extra: *mut c_void,
) {
    run_export(
        |stack, ui| driver::extract_file(stack, ui),
        hwnd_parent,
        string_size,
        stacktop,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(stack: &mut NsisStack) -> Vec<String> {
        std::iter::from_fn(|| stack.pop()).collect()
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut top: *mut StackT = ptr::null_mut();
        let mut stack = unsafe { NsisStack::new(&mut top, 1024) }.unwrap();
        stack.push("out");
        stack.push("a.zip");
        assert_eq!(drain(&mut stack), ["a.zip", "out"]);
        assert!(top.is_null());
    }

    #[test]
    fn test_push_truncates_to_string_size() {
        let mut top: *mut StackT = ptr::null_mut();
        let mut stack = unsafe { NsisStack::new(&mut top, 5) }.unwrap();
        stack.push("success");
        assert_eq!(stack.pop().as_deref(), Some("succ"));
    }

    #[test]
    fn test_null_stack_is_rejected() {
        assert!(unsafe { NsisStack::new(ptr::null_mut(), 1024) }.is_none());
    }

    #[test]
    fn test_no_parent_window_means_no_ui() {
        let mut ui = HostWindows::discover(0);
        // must not touch any window
        ui.set_status("status");
        ui.log_message("row");
    }
}
