//=====================================================
// File: tests/mod.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Crate-internal script tests
// Objective: Run the recorded fixtures and stress block matching across
//            generated nesting depths
//=====================================================

mod nesting;

//=====================================================
// End of file
//=====================================================
