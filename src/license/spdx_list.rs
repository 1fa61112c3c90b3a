//! SPDX license list v3.27.0, generated from
//! <https://github.com/spdx/license-list-data>. Do not edit by hand.

use super::{SpdxLicense, deprecated, row};

#[rustfmt::skip]
pub(super) static SPDX_LICENSES: &[SpdxLicense] = &[
    row("0BSD", "BSD Zero Clause License"),
    row("3D-Slicer-1.0", "3D Slicer License v1.0"),
    row("AAL", "Attribution Assurance License"),
    row("ADSL", "Amazon Digital Services License"),
    row("AFL-1.1", "Academic Free License v1.1"),
    row("AFL-1.2", "Academic Free License v1.2"),
    row("AFL-2.0", "Academic Free License v2.0"),
    row("AFL-2.1", "Academic Free License v2.1"),
    row("AFL-3.0", "Academic Free License v3.0"),
    deprecated("AGPL-1.0", "Affero General Public License v1.0"),
    row("AGPL-1.0-only", "Affero General Public License v1.0 only"),
    row("AGPL-1.0-or-later", "Affero General Public License v1.0 or later"),
    deprecated("AGPL-3.0", "GNU Affero General Public License v3.0"),
    row("AGPL-3.0-only", "GNU Affero General Public License v3.0 only"),
    row("AGPL-3.0-or-later", "GNU Affero General Public License v3.0 or later"),
    row("AMD-newlib", "AMD newlib License"),
    row("AMDPLPA", "AMD's plpa_map.c License"),
    row("AML", "Apple MIT License"),
    row("AML-glslang", "AML glslang variant License"),
    row("AMPAS", "Academy of Motion Picture Arts and Sciences BSD"),
    row("ANTLR-PD", "ANTLR Software Rights Notice"),
    row("ANTLR-PD-fallback", "ANTLR Software Rights Notice with license fallback"),
    row("APAFML", "Adobe Postscript AFM License"),
    row("APL-1.0", "Adaptive Public License 1.0"),
    row("APSL-1.0", "Apple Public Source License 1.0"),
    row("APSL-1.1", "Apple Public Source License 1.1"),
    row("APSL-1.2", "Apple Public Source License 1.2"),
    row("APSL-2.0", "Apple Public Source License 2.0"),
    row("ASWF-Digital-Assets-1.0", "ASWF Digital Assets License version 1.0"),
    row("ASWF-Digital-Assets-1.1", "ASWF Digital Assets License 1.1"),
    row("Abstyles", "Abstyles License"),
    row("AdaCore-doc", "AdaCore Doc License"),
    row("Adobe-2006", "Adobe Systems Incorporated Source Code License Agreement"),
    row("Adobe-Display-PostScript", "Adobe Display PostScript License"),
    row("Adobe-Glyph", "Adobe Glyph List License"),
    row("Adobe-Utopia", "Adobe Utopia Font License"),
    row("Afmparse", "Afmparse License"),
    row("Aladdin", "Aladdin Free Public License"),
    row("Apache-1.0", "Apache License 1.0"),
    row("Apache-1.1", "Apache License 1.1"),
    row("Apache-2.0", "Apache License 2.0"),
    row("App-s2p", "App::s2p License"),
    row("Arphic-1999", "Arphic Public License"),
    row("Artistic-1.0", "Artistic License 1.0"),
    row("Artistic-1.0-Perl", "Artistic License 1.0 (Perl)"),
    row("Artistic-1.0-cl8", "Artistic License 1.0 w/clause 8"),
    row("Artistic-2.0", "Artistic License 2.0"),
    row("Artistic-dist", "Artistic License 1.0 (dist)"),
    row("Aspell-RU", "Aspell Russian License"),
    row("BSD-1-Clause", "BSD 1-Clause License"),
    row("BSD-2-Clause", r#"BSD 2-Clause "Simplified" License"#),
    row("BSD-2-Clause-Darwin", "BSD 2-Clause - Ian Darwin variant"),
    deprecated("BSD-2-Clause-FreeBSD", "BSD 2-Clause FreeBSD License"),
    deprecated("BSD-2-Clause-NetBSD", "BSD 2-Clause NetBSD License"),
    row("BSD-2-Clause-Patent", "BSD-2-Clause Plus Patent License"),
    row("BSD-2-Clause-Views", "BSD 2-Clause with views sentence"),
    row("BSD-2-Clause-first-lines", "BSD 2-Clause - first lines requirement"),
    row("BSD-2-Clause-pkgconf-disclaimer", "BSD 2-Clause pkgconf disclaimer variant"),
    row("BSD-3-Clause", r#"BSD 3-Clause "New" or "Revised" License"#),
    row("BSD-3-Clause-Attribution", "BSD with attribution"),
    row("BSD-3-Clause-Clear", "BSD 3-Clause Clear License"),
    row("BSD-3-Clause-HP", "Hewlett-Packard BSD variant license"),
    row("BSD-3-Clause-LBNL", "Lawrence Berkeley National Labs BSD variant license"),
    row("BSD-3-Clause-Modification", "BSD 3-Clause Modification"),
    row("BSD-3-Clause-No-Military-License", "BSD 3-Clause No Military License"),
    row("BSD-3-Clause-No-Nuclear-License", "BSD 3-Clause No Nuclear License"),
    row("BSD-3-Clause-No-Nuclear-License-2014", "BSD 3-Clause No Nuclear License 2014"),
    row("BSD-3-Clause-No-Nuclear-Warranty", "BSD 3-Clause No Nuclear Warranty"),
    row("BSD-3-Clause-Open-MPI", "BSD 3-Clause Open MPI variant"),
    row("BSD-3-Clause-Sun", "BSD 3-Clause Sun Microsystems"),
    row("BSD-3-Clause-acpica", "BSD 3-Clause acpica variant"),
    row("BSD-3-Clause-flex", "BSD 3-Clause Flex variant"),
    row("BSD-4-Clause", r#"BSD 4-Clause "Original" or "Old" License"#),
    row("BSD-4-Clause-Shortened", "BSD 4 Clause Shortened"),
    row("BSD-4-Clause-UC", "BSD-4-Clause (University of California-Specific)"),
    row("BSD-4.3RENO", "BSD 4.3 RENO License"),
    row("BSD-4.3TAHOE", "BSD 4.3 TAHOE License"),
    row("BSD-Advertising-Acknowledgement", "BSD Advertising Acknowledgement License"),
    row("BSD-Attribution-HPND-disclaimer", "BSD with Attribution and HPND disclaimer"),
    row("BSD-Inferno-Nettverk", "BSD-Inferno-Nettverk"),
    row("BSD-Protection", "BSD Protection License"),
    row("BSD-Source-Code", "BSD Source Code Attribution"),
    row("BSD-Source-beginning-file", "BSD Source Code Attribution - beginning of file variant"),
    row("BSD-Systemics", "Systemics BSD variant license"),
    row("BSD-Systemics-W3Works", "Systemics W3Works BSD variant license"),
    row("BSL-1.0", "Boost Software License 1.0"),
    row("BUSL-1.1", "Business Source License 1.1"),
    row("Baekmuk", "Baekmuk License"),
    row("Bahyph", "Bahyph License"),
    row("Barr", "Barr License"),
    row("Beerware", "Beerware License"),
    row("BitTorrent-1.0", "BitTorrent Open Source License v1.0"),
    row("BitTorrent-1.1", "BitTorrent Open Source License v1.1"),
    row("Bitstream-Charter", "Bitstream Charter Font License"),
    row("Bitstream-Vera", "Bitstream Vera Font License"),
    row("BlueOak-1.0.0", "Blue Oak Model License 1.0.0"),
    row("Boehm-GC", "Boehm-Demers-Weiser GC License"),
    row("Boehm-GC-without-fee", "Boehm-Demers-Weiser GC License (without fee)"),
    row("Borceux", "Borceux license"),
    row("Brian-Gladman-2-Clause", "Brian Gladman 2-Clause License"),
    row("Brian-Gladman-3-Clause", "Brian Gladman 3-Clause License"),
    row("C-UDA-1.0", "Computational Use of Data Agreement v1.0"),
    row("CAL-1.0", "Cryptographic Autonomy License 1.0"),
    row("CAL-1.0-Combined-Work-Exception", "Cryptographic Autonomy License 1.0 (Combined Work Exception)"),
    row("CATOSL-1.1", "Computer Associates Trusted Open Source License 1.1"),
    row("CC-BY-1.0", "Creative Commons Attribution 1.0 Generic"),
    row("CC-BY-2.0", "Creative Commons Attribution 2.0 Generic"),
    row("CC-BY-2.5", "Creative Commons Attribution 2.5 Generic"),
    row("CC-BY-2.5-AU", "Creative Commons Attribution 2.5 Australia"),
    row("CC-BY-3.0", "Creative Commons Attribution 3.0 Unported"),
    row("CC-BY-3.0-AT", "Creative Commons Attribution 3.0 Austria"),
    row("CC-BY-3.0-AU", "Creative Commons Attribution 3.0 Australia"),
    row("CC-BY-3.0-DE", "Creative Commons Attribution 3.0 Germany"),
    row("CC-BY-3.0-IGO", "Creative Commons Attribution 3.0 IGO"),
    row("CC-BY-3.0-NL", "Creative Commons Attribution 3.0 Netherlands"),
    row("CC-BY-3.0-US", "Creative Commons Attribution 3.0 United States"),
    row("CC-BY-4.0", "Creative Commons Attribution 4.0 International"),
    row("CC-BY-NC-1.0", "Creative Commons Attribution Non Commercial 1.0 Generic"),
    row("CC-BY-NC-2.0", "Creative Commons Attribution Non Commercial 2.0 Generic"),
    row("CC-BY-NC-2.5", "Creative Commons Attribution Non Commercial 2.5 Generic"),
    row("CC-BY-NC-3.0", "Creative Commons Attribution Non Commercial 3.0 Unported"),
    row("CC-BY-NC-3.0-DE", "Creative Commons Attribution Non Commercial 3.0 Germany"),
    row("CC-BY-NC-4.0", "Creative Commons Attribution Non Commercial 4.0 International"),
    row("CC-BY-NC-ND-1.0", "Creative Commons Attribution Non Commercial No Derivatives 1.0 Generic"),
    row("CC-BY-NC-ND-2.0", "Creative Commons Attribution Non Commercial No Derivatives 2.0 Generic"),
    row("CC-BY-NC-ND-2.5", "Creative Commons Attribution Non Commercial No Derivatives 2.5 Generic"),
    row("CC-BY-NC-ND-3.0", "Creative Commons Attribution Non Commercial No Derivatives 3.0 Unported"),
    row("CC-BY-NC-ND-3.0-DE", "Creative Commons Attribution Non Commercial No Derivatives 3.0 Germany"),
    row("CC-BY-NC-ND-3.0-IGO", "Creative Commons Attribution Non Commercial No Derivatives 3.0 IGO"),
    row("CC-BY-NC-ND-4.0", "Creative Commons Attribution Non Commercial No Derivatives 4.0 International"),
    row("CC-BY-NC-SA-1.0", "Creative Commons Attribution Non Commercial Share Alike 1.0 Generic"),
    row("CC-BY-NC-SA-2.0", "Creative Commons Attribution Non Commercial Share Alike 2.0 Generic"),
    row("CC-BY-NC-SA-2.0-DE", "Creative Commons Attribution Non Commercial Share Alike 2.0 Germany"),
    row("CC-BY-NC-SA-2.0-FR", "Creative Commons Attribution-NonCommercial-ShareAlike 2.0 France"),
    row("CC-BY-NC-SA-2.0-UK", "Creative Commons Attribution Non Commercial Share Alike 2.0 England and Wales"),
    row("CC-BY-NC-SA-2.5", "Creative Commons Attribution Non Commercial Share Alike 2.5 Generic"),
    row("CC-BY-NC-SA-3.0", "Creative Commons Attribution Non Commercial Share Alike 3.0 Unported"),
    row("CC-BY-NC-SA-3.0-DE", "Creative Commons Attribution Non Commercial Share Alike 3.0 Germany"),
    row("CC-BY-NC-SA-3.0-IGO", "Creative Commons Attribution Non Commercial Share Alike 3.0 IGO"),
    row("CC-BY-NC-SA-4.0", "Creative Commons Attribution Non Commercial Share Alike 4.0 International"),
    row("CC-BY-ND-1.0", "Creative Commons Attribution No Derivatives 1.0 Generic"),
    row("CC-BY-ND-2.0", "Creative Commons Attribution No Derivatives 2.0 Generic"),
    row("CC-BY-ND-2.5", "Creative Commons Attribution No Derivatives 2.5 Generic"),
    row("CC-BY-ND-3.0", "Creative Commons Attribution No Derivatives 3.0 Unported"),
    row("CC-BY-ND-3.0-DE", "Creative Commons Attribution No Derivatives 3.0 Germany"),
    row("CC-BY-ND-4.0", "Creative Commons Attribution No Derivatives 4.0 International"),
    row("CC-BY-SA-1.0", "Creative Commons Attribution Share Alike 1.0 Generic"),
    row("CC-BY-SA-2.0", "Creative Commons Attribution Share Alike 2.0 Generic"),
    row("CC-BY-SA-2.0-UK", "Creative Commons Attribution Share Alike 2.0 England and Wales"),
    row("CC-BY-SA-2.1-JP", "Creative Commons Attribution Share Alike 2.1 Japan"),
    row("CC-BY-SA-2.5", "Creative Commons Attribution Share Alike 2.5 Generic"),
    row("CC-BY-SA-3.0", "Creative Commons Attribution Share Alike 3.0 Unported"),
    row("CC-BY-SA-3.0-AT", "Creative Commons Attribution Share Alike 3.0 Austria"),
    row("CC-BY-SA-3.0-DE", "Creative Commons Attribution Share Alike 3.0 Germany"),
    row("CC-BY-SA-3.0-IGO", "Creative Commons Attribution-ShareAlike 3.0 IGO"),
    row("CC-BY-SA-4.0", "Creative Commons Attribution Share Alike 4.0 International"),
    row("CC-PDDC", "Creative Commons Public Domain Dedication and Certification"),
    row("CC-PDM-1.0", "Creative    Commons Public Domain Mark 1.0 Universal"),
    row("CC-SA-1.0", "Creative Commons Share Alike 1.0 Generic"),
    row("CC0-1.0", "Creative Commons Zero v1.0 Universal"),
    row("CDDL-1.0", "Common Development and Distribution License 1.0"),
    row("CDDL-1.1", "Common Development and Distribution License 1.1"),
    row("CDL-1.0", "Common Documentation License 1.0"),
    row("CDLA-Permissive-1.0", "Community Data License Agreement Permissive 1.0"),
    row("CDLA-Permissive-2.0", "Community Data License Agreement Permissive 2.0"),
    row("CDLA-Sharing-1.0", "Community Data License Agreement Sharing 1.0"),
    row("CECILL-1.0", "CeCILL Free Software License Agreement v1.0"),
    row("CECILL-1.1", "CeCILL Free Software License Agreement v1.1"),
    row("CECILL-2.0", "CeCILL Free Software License Agreement v2.0"),
    row("CECILL-2.1", "CeCILL Free Software License Agreement v2.1"),
    row("CECILL-B", "CeCILL-B Free Software License Agreement"),
    row("CECILL-C", "CeCILL-C Free Software License Agreement"),
    row("CERN-OHL-1.1", "CERN Open Hardware Licence v1.1"),
    row("CERN-OHL-1.2", "CERN Open Hardware Licence v1.2"),
    row("CERN-OHL-P-2.0", "CERN Open Hardware Licence Version 2 - Permissive"),
    row("CERN-OHL-S-2.0", "CERN Open Hardware Licence Version 2 - Strongly Reciprocal"),
    row("CERN-OHL-W-2.0", "CERN Open Hardware Licence Version 2 - Weakly Reciprocal"),
    row("CFITSIO", "CFITSIO License"),
    row("CMU-Mach", "CMU Mach License"),
    row("CMU-Mach-nodoc", "CMU    Mach - no notices-in-documentation variant"),
    row("CNRI-Jython", "CNRI Jython License"),
    row("CNRI-Python", "CNRI Python License"),
    row("CNRI-Python-GPL-Compatible", "CNRI Python Open Source GPL Compatible License Agreement"),
    row("COIL-1.0", "Copyfree Open Innovation License"),
    row("CPAL-1.0", "Common Public Attribution License 1.0"),
    row("CPL-1.0", "Common Public License 1.0"),
    row("CPOL-1.02", "Code Project Open License 1.02"),
    row("CUA-OPL-1.0", "CUA Office Public License v1.0"),
    row("Caldera", "Caldera License"),
    row("Caldera-no-preamble", "Caldera License (without preamble)"),
    row("Catharon", "Catharon License"),
    row("ClArtistic", "Clarified Artistic License"),
    row("Clips", "Clips License"),
    row("Community-Spec-1.0", "Community Specification License 1.0"),
    row("Condor-1.1", "Condor Public License v1.1"),
    row("Cornell-Lossless-JPEG", "Cornell Lossless JPEG License"),
    row("Cronyx", "Cronyx License"),
    row("Crossword", "Crossword License"),
    row("CryptoSwift", "CryptoSwift License"),
    row("CrystalStacker", "CrystalStacker License"),
    row("Cube", "Cube License"),
    row("D-FSL-1.0", "Deutsche Freie Software Lizenz"),
    row("DEC-3-Clause", "DEC 3-Clause License"),
    row("DL-DE-BY-2.0", "Data licence Germany – attribution – version 2.0"),
    row("DL-DE-ZERO-2.0", "Data licence Germany – zero – version 2.0"),
    row("DOC", "DOC License"),
    row("DRL-1.0", "Detection Rule License 1.0"),
    row("DRL-1.1", "Detection Rule License 1.1"),
    row("DSDP", "DSDP License"),
    row("DocBook-DTD", "DocBook DTD License"),
    row("DocBook-Schema", "DocBook Schema License"),
    row("DocBook-Stylesheet", "DocBook Stylesheet License"),
    row("DocBook-XML", "DocBook XML License"),
    row("Dotseqn", "Dotseqn License"),
    row("ECL-1.0", "Educational Community License v1.0"),
    row("ECL-2.0", "Educational Community License v2.0"),
    row("EFL-1.0", "Eiffel Forum License v1.0"),
    row("EFL-2.0", "Eiffel Forum License v2.0"),
    row("EPICS", "EPICS Open License"),
    row("EPL-1.0", "Eclipse Public License 1.0"),
    row("EPL-2.0", "Eclipse Public License 2.0"),
    row("EUDatagrid", "EU DataGrid Software License"),
    row("EUPL-1.0", "European Union Public License 1.0"),
    row("EUPL-1.1", "European Union Public License 1.1"),
    row("EUPL-1.2", "European Union Public License 1.2"),
    row("Elastic-2.0", "Elastic License 2.0"),
    row("Entessa", "Entessa Public License v1.0"),
    row("ErlPL-1.1", "Erlang Public License v1.1"),
    row("Eurosym", "Eurosym License"),
    row("FBM", "Fuzzy Bitmap License"),
    row("FDK-AAC", "Fraunhofer FDK AAC Codec Library"),
    row("FSFAP", "FSF All Permissive License"),
    row("FSFAP-no-warranty-disclaimer", "FSF All Permissive License (without Warranty)"),
    row("FSFUL", "FSF Unlimited License"),
    row("FSFULLR", "FSF Unlimited License (with License Retention)"),
    row("FSFULLRSD", "FSF Unlimited License (with License Retention and Short Disclaimer)"),
    row("FSFULLRWD", "FSF Unlimited License (With License Retention and Warranty Disclaimer)"),
    row("FSL-1.1-ALv2", "Functional Source License, Version 1.1, ALv2 Future License"),
    row("FSL-1.1-MIT", "Functional Source License, Version 1.1, MIT Future License"),
    row("FTL", "Freetype Project License"),
    row("Fair", "Fair License"),
    row("Ferguson-Twofish", "Ferguson Twofish License"),
    row("Frameworx-1.0", "Frameworx Open License 1.0"),
    row("FreeBSD-DOC", "FreeBSD Documentation License"),
    row("FreeImage", "FreeImage Public License v1.0"),
    row("Furuseth", "Furuseth License"),
    row("GCR-docs", "Gnome GCR Documentation License"),
    row("GD", "GD License"),
    deprecated("GFDL-1.1", "GNU Free Documentation License v1.1"),
    row("GFDL-1.1-invariants", "GNU Free Documentation License v1.1 only - invariants"),
    row("GFDL-1.1-invariants-only", "GNU Free Documentation License v1.1 only - invariants"),
    row("GFDL-1.1-invariants-or-later", "GNU Free Documentation License v1.1 or later - invariants"),
    row("GFDL-1.1-no-invariants", "GNU Free Documentation License v1.1 only - no invariants"),
    row("GFDL-1.1-no-invariants-only", "GNU Free Documentation License v1.1 only - no invariants"),
    row("GFDL-1.1-no-invariants-or-later", "GNU Free Documentation License v1.1 or later - no invariants"),
    row("GFDL-1.1-only", "GNU Free Documentation License v1.1 only"),
    row("GFDL-1.1-or-later", "GNU Free Documentation License v1.1 or later"),
    deprecated("GFDL-1.2", "GNU Free Documentation License v1.2"),
    row("GFDL-1.2-invariants", "GNU Free Documentation License v1.2 only - invariants"),
    row("GFDL-1.2-invariants-only", "GNU Free Documentation License v1.2 only - invariants"),
    row("GFDL-1.2-invariants-or-later", "GNU Free Documentation License v1.2 or later - invariants"),
    row("GFDL-1.2-no-invariants", "GNU Free Documentation License v1.2 only - no invariants"),
    row("GFDL-1.2-no-invariants-only", "GNU Free Documentation License v1.2 only - no invariants"),
    row("GFDL-1.2-no-invariants-or-later", "GNU Free Documentation License v1.2 or later - no invariants"),
    row("GFDL-1.2-only", "GNU Free Documentation License v1.2 only"),
    row("GFDL-1.2-or-later", "GNU Free Documentation License v1.2 or later"),
    deprecated("GFDL-1.3", "GNU Free Documentation License v1.3"),
    row("GFDL-1.3-invariants", "GNU Free Documentation License v1.3 only - invariants"),
    row("GFDL-1.3-invariants-only", "GNU Free Documentation License v1.3 only - invariants"),
    row("GFDL-1.3-invariants-or-later", "GNU Free Documentation License v1.3 or later - invariants"),
    row("GFDL-1.3-no-invariants", "GNU Free Documentation License v1.3 only - no invariants"),
    row("GFDL-1.3-no-invariants-only", "GNU Free Documentation License v1.3 only - no invariants"),
    row("GFDL-1.3-no-invariants-or-later", "GNU Free Documentation License v1.3 or later - no invariants"),
    row("GFDL-1.3-only", "GNU Free Documentation License v1.3 only"),
    row("GFDL-1.3-or-later", "GNU Free Documentation License v1.3 or later"),
    row("GL2PS", "GL2PS License"),
    row("GLWTPL", "Good Luck With That Public License"),
    deprecated("GPL-1.0", "GNU General Public License v1.0 only"),
    deprecated("GPL-1.0+", "GNU General Public License v1.0 or later"),
    row("GPL-1.0-only", "GNU General Public License v1.0 only"),
    row("GPL-1.0-or-later", "GNU General Public License v1.0 or later"),
    deprecated("GPL-2.0", "GNU General Public License v2.0 only"),
    deprecated("GPL-2.0+", "GNU General Public License v2.0 or later"),
    row("GPL-2.0-only", "GNU General Public License v2.0 only"),
    row("GPL-2.0-or-later", "GNU General Public License v2.0 or later"),
    deprecated("GPL-2.0-with-GCC-exception", "GNU General Public License v2.0 w/GCC Runtime Library exception"),
    deprecated("GPL-2.0-with-autoconf-exception", "GNU General Public License v2.0 w/Autoconf exception"),
    deprecated("GPL-2.0-with-bison-exception", "GNU General Public License v2.0 w/Bison exception"),
    deprecated("GPL-2.0-with-classpath-exception", "GNU General Public License v2.0 w/Classpath exception"),
    deprecated("GPL-2.0-with-font-exception", "GNU General Public License v2.0 w/Font exception"),
    deprecated("GPL-3.0", "GNU General Public License v3.0 only"),
    deprecated("GPL-3.0+", "GNU General Public License v3.0 or later"),
    row("GPL-3.0-only", "GNU General Public License v3.0 only"),
    row("GPL-3.0-or-later", "GNU General Public License v3.0 or later"),
    deprecated("GPL-3.0-with-GCC-exception", "GNU General Public License v3.0 w/GCC Runtime Library exception"),
    deprecated("GPL-3.0-with-autoconf-exception", "GNU General Public License v3.0 w/Autoconf exception"),
    row("Game-Programming-Gems", "Game Programming Gems License"),
    row("Giftware", "Giftware License"),
    row("Glide", "3dfx Glide License"),
    row("Glulxe", "Glulxe License"),
    row("Graphics-Gems", "Graphics Gems License"),
    row("Gutmann", "Gutmann License"),
    row("HDF5", "HDF5 License"),
    row("HIDAPI", "HIDAPI License"),
    row("HP-1986", "Hewlett-Packard 1986 License"),
    row("HP-1989", "Hewlett-Packard 1989 License"),
    row("HPND", "Historical Permission Notice and Disclaimer"),
    row("HPND-DEC", "Historical Permission Notice and Disclaimer - DEC variant"),
    row("HPND-Fenneberg-Livingston", "Historical Permission Notice and Disclaimer - Fenneberg-Livingston variant"),
    row("HPND-INRIA-IMAG", "Historical Permission Notice and Disclaimer    - INRIA-IMAG variant"),
    row("HPND-Intel", "Historical Permission Notice and Disclaimer - Intel variant"),
    row("HPND-Kevlin-Henney", "Historical Permission Notice and Disclaimer - Kevlin Henney variant"),
    row("HPND-MIT-disclaimer", "Historical Permission Notice and Disclaimer with MIT disclaimer"),
    row("HPND-Markus-Kuhn", "Historical Permission Notice and Disclaimer - Markus Kuhn variant"),
    row("HPND-Netrek", "Historical Permission Notice and Disclaimer - Netrek variant"),
    row("HPND-Pbmplus", "Historical Permission Notice and Disclaimer - Pbmplus variant"),
    row("HPND-UC", "Historical Permission Notice and Disclaimer - University of California variant"),
    row("HPND-UC-export-US", "Historical Permission Notice and Disclaimer - University of California, US export warning"),
    row("HPND-doc", "Historical Permission Notice and Disclaimer - documentation variant"),
    row("HPND-doc-sell", "Historical Permission Notice and Disclaimer - documentation sell variant"),
    row("HPND-export-US", "HPND with US Government export control warning"),
    row("HPND-export-US-acknowledgement", "HPND with US Government export control warning and acknowledgment"),
    row("HPND-export-US-modify", "HPND with US Government export control warning and modification rqmt"),
    row("HPND-export2-US", "HPND with US Government export control and 2 disclaimers"),
    row("HPND-merchantability-variant", "Historical Permission Notice and Disclaimer - merchantability variant"),
    row("HPND-sell-MIT-disclaimer-xserver", "Historical Permission Notice and Disclaimer - sell xserver variant with MIT disclaimer"),
    row("HPND-sell-regexpr", "Historical Permission Notice and Disclaimer - sell regexpr variant"),
    row("HPND-sell-variant", "Historical Permission Notice and Disclaimer - sell variant"),
    row("HPND-sell-variant-MIT-disclaimer", "HPND sell variant with MIT disclaimer"),
    row("HPND-sell-variant-MIT-disclaimer-rev", "HPND sell variant with MIT disclaimer - reverse"),
    row("HTMLTIDY", "HTML Tidy License"),
    row("HaskellReport", "Haskell Language Report License"),
    row("Hippocratic-2.1", "Hippocratic License 2.1"),
    row("IBM-pibs", "IBM PowerPC Initialization and Boot Software"),
    row("ICU", "ICU License"),
    row("IEC-Code-Components-EULA", "IEC    Code Components End-user licence agreement"),
    row("IJG", "Independent JPEG Group License"),
    row("IJG-short", "Independent JPEG Group License - short"),
    row("IPA", "IPA Font License"),
    row("IPL-1.0", "IBM Public License v1.0"),
    row("ISC", "ISC License"),
    row("ISC-Veillard", "ISC Veillard variant"),
    row("ImageMagick", "ImageMagick License"),
    row("Imlib2", "Imlib2 License"),
    row("Info-ZIP", "Info-ZIP License"),
    row("Inner-Net-2.0", "Inner Net License v2.0"),
    row("InnoSetup", "Inno Setup License"),
    row("Intel", "Intel Open Source License"),
    row("Intel-ACPI", "Intel ACPI Software License Agreement"),
    row("Interbase-1.0", "Interbase Public License v1.0"),
    row("JPL-image", "JPL Image Use Policy"),
    row("JPNIC", "Japan Network Information Center License"),
    row("JSON", "JSON License"),
    row("Jam", "Jam License"),
    row("JasPer-2.0", "JasPer License"),
    row("Kastrup", "Kastrup License"),
    row("Kazlib", "Kazlib License"),
    row("Knuth-CTAN", "Knuth CTAN License"),
    row("LAL-1.2", "Licence Art Libre 1.2"),
    row("LAL-1.3", "Licence Art Libre 1.3"),
    deprecated("LGPL-2.0", "GNU Library General Public License v2 only"),
    deprecated("LGPL-2.0+", "GNU Library General Public License v2 or later"),
    row("LGPL-2.0-only", "GNU Library General Public License v2 only"),
    row("LGPL-2.0-or-later", "GNU Library General Public License v2 or later"),
    deprecated("LGPL-2.1", "GNU Lesser General Public License v2.1 only"),
    deprecated("LGPL-2.1+", "GNU Lesser General Public License v2.1 or later"),
    row("LGPL-2.1-only", "GNU Lesser General Public License v2.1 only"),
    row("LGPL-2.1-or-later", "GNU Lesser General Public License v2.1 or later"),
    deprecated("LGPL-3.0", "GNU Lesser General Public License v3.0 only"),
    deprecated("LGPL-3.0+", "GNU Lesser General Public License v3.0 or later"),
    row("LGPL-3.0-only", "GNU Lesser General Public License v3.0 only"),
    row("LGPL-3.0-or-later", "GNU Lesser General Public License v3.0 or later"),
    row("LGPLLR", "Lesser General Public License For Linguistic Resources"),
    row("LOOP", "Common Lisp LOOP License"),
    row("LPD-document", "LPD Documentation License"),
    row("LPL-1.0", "Lucent Public License Version 1.0"),
    row("LPL-1.02", "Lucent Public License v1.02"),
    row("LPPL-1.0", "LaTeX Project Public License v1.0"),
    row("LPPL-1.1", "LaTeX Project Public License v1.1"),
    row("LPPL-1.2", "LaTeX Project Public License v1.2"),
    row("LPPL-1.3a", "LaTeX Project Public License v1.3a"),
    row("LPPL-1.3c", "LaTeX Project Public License v1.3c"),
    row("LZMA-SDK-9.11-to-9.20", "LZMA SDK License (versions 9.11 to 9.20)"),
    row("LZMA-SDK-9.22", "LZMA SDK License (versions 9.22 and beyond)"),
    row("Latex2e", "Latex2e License"),
    row("Latex2e-translated-notice", "Latex2e with translated notice permission"),
    row("Leptonica", "Leptonica License"),
    row("LiLiQ-P-1.1", "Licence Libre du Québec – Permissive version 1.1"),
    row("LiLiQ-R-1.1", "Licence Libre du Québec – Réciprocité version 1.1"),
    row("LiLiQ-Rplus-1.1", "Licence Libre du Québec – Réciprocité forte version 1.1"),
    row("Libpng", "libpng License"),
    row("Linux-OpenIB", "Linux Kernel Variant of OpenIB.org license"),
    row("Linux-man-pages-1-para", "Linux man-pages - 1 paragraph"),
    row("Linux-man-pages-copyleft", "Linux man-pages Copyleft"),
    row("Linux-man-pages-copyleft-2-para", "Linux man-pages Copyleft - 2 paragraphs"),
    row("Linux-man-pages-copyleft-var", "Linux man-pages Copyleft Variant"),
    row("Lucida-Bitmap-Fonts", "Lucida Bitmap Fonts License"),
    row("MIPS", "MIPS License"),
    row("MIT", "MIT License"),
    row("MIT-0", "MIT No Attribution"),
    row("MIT-CMU", "CMU License"),
    row("MIT-Click", "MIT Click License"),
    row("MIT-Festival", "MIT Festival Variant"),
    row("MIT-Khronos-old", "MIT Khronos - old variant"),
    row("MIT-Modern-Variant", "MIT License Modern Variant"),
    row("MIT-Wu", "MIT Tom Wu Variant"),
    row("MIT-advertising", "Enlightenment License (e16)"),
    row("MIT-enna", "enna License"),
    row("MIT-feh", "feh License"),
    row("MIT-open-group", "MIT Open Group variant"),
    row("MIT-testregex", "MIT testregex Variant"),
    row("MITNFA", "MIT +no-false-attribs license"),
    row("MMIXware", "MMIXware License"),
    row("MPEG-SSG", "MPEG Software Simulation"),
    row("MPL-1.0", "Mozilla Public License 1.0"),
    row("MPL-1.1", "Mozilla Public License 1.1"),
    row("MPL-2.0", "Mozilla Public License 2.0"),
    row("MPL-2.0-no-copyleft-exception", "Mozilla Public License 2.0 (no copyleft exception)"),
    row("MS-LPL", "Microsoft Limited Public License"),
    row("MS-PL", "Microsoft Public License"),
    row("MS-RL", "Microsoft Reciprocal License"),
    row("MTLL", "Matrix Template Library License"),
    row("Mackerras-3-Clause", "Mackerras 3-Clause License"),
    row("Mackerras-3-Clause-acknowledgment", "Mackerras 3-Clause - acknowledgment variant"),
    row("MakeIndex", "MakeIndex License"),
    row("Martin-Birgmeier", "Martin Birgmeier License"),
    row("McPhee-slideshow", "McPhee Slideshow License"),
    row("Minpack", "Minpack License"),
    row("MirOS", "The MirOS Licence"),
    row("Motosoto", "Motosoto License"),
    row("MulanPSL-1.0", "Mulan Permissive Software License, Version 1"),
    row("MulanPSL-2.0", "Mulan Permissive Software License, Version 2"),
    row("Multics", "Multics License"),
    row("Mup", "Mup License"),
    row("NAIST-2003", "Nara Institute of Science and Technology License (2003)"),
    row("NASA-1.3", "NASA Open Source Agreement 1.3"),
    row("NBPL-1.0", "Net Boolean Public License v1"),
    row("NCBI-PD", "NCBI Public Domain Notice"),
    row("NCGL-UK-2.0", "Non-Commercial Government Licence"),
    row("NCL", "NCL Source Code License"),
    row("NCSA", "University of Illinois/NCSA Open Source License"),
    row("NGPL", "Nethack General Public License"),
    row("NICTA-1.0", "NICTA Public Software License, Version 1.0"),
    row("NIST-PD", "NIST Public Domain Notice"),
    row("NIST-PD-fallback", "NIST Public Domain Notice with license fallback"),
    row("NIST-Software", "NIST Software License"),
    row("NLOD-1.0", "Norwegian Licence for Open Government Data (NLOD) 1.0"),
    row("NLOD-2.0", "Norwegian Licence for Open Government Data (NLOD) 2.0"),
    row("NLPL", "No Limit Public License"),
    row("NOASSERTION", "NOASSERTION"),
    row("NOSL", "Netizen Open Source License"),
    row("NPL-1.0", "Netscape Public License v1.0"),
    row("NPL-1.1", "Netscape Public License v1.1"),
    row("NPOSL-3.0", "Non-Profit Open Software License 3.0"),
    row("NRL", "NRL License"),
    row("NTIA-PD", "NTIA Public Domain Notice"),
    row("NTP", "NTP License"),
    row("NTP-0", "NTP No Attribution"),
    row("Naumen", "Naumen Public License"),
    deprecated("Net-SNMP", "Net-SNMP License"),
    row("NetCDF", "NetCDF license"),
    row("Newsletr", "Newsletr License"),
    row("Nokia", "Nokia Open Source License"),
    row("Noweb", "Noweb License"),
    deprecated("Nunit", "Nunit License"),
    row("O-UDA-1.0", "Open Use of Data Agreement v1.0"),
    row("OAR", "OAR License"),
    row("OCCT-PL", "Open CASCADE Technology Public License"),
    row("OCLC-2.0", "OCLC Research Public License 2.0"),
    row("ODC-By-1.0", "Open Data Commons Attribution License v1.0"),
    row("ODbL-1.0", "Open Data Commons Open Database License v1.0"),
    row("OFFIS", "OFFIS License"),
    row("OFL-1.0", "SIL Open Font License 1.0"),
    row("OFL-1.0-RFN", "SIL Open Font License 1.0 with Reserved Font Name"),
    row("OFL-1.0-no-RFN", "SIL Open Font License 1.0 with no Reserved Font Name"),
    row("OFL-1.1", "SIL Open Font License 1.1"),
    row("OFL-1.1-RFN", "SIL Open Font License 1.1 with Reserved Font Name"),
    row("OFL-1.1-no-RFN", "SIL Open Font License 1.1 with no Reserved Font Name"),
    row("OGC-1.0", "OGC Software License, Version 1.0"),
    row("OGDL-Taiwan-1.0", "Taiwan Open Government Data License, version 1.0"),
    row("OGL-Canada-2.0", "Open Government Licence - Canada"),
    row("OGL-UK-1.0", "Open Government Licence v1.0"),
    row("OGL-UK-2.0", "Open Government Licence v2.0"),
    row("OGL-UK-3.0", "Open Government Licence v3.0"),
    row("OGTSL", "Open Group Test Suite License"),
    row("OLDAP-1.1", "Open LDAP Public License v1.1"),
    row("OLDAP-1.2", "Open LDAP Public License v1.2"),
    row("OLDAP-1.3", "Open LDAP Public License v1.3"),
    row("OLDAP-1.4", "Open LDAP Public License v1.4"),
    row("OLDAP-2.0", "Open LDAP Public License v2.0 (or possibly 2.0A and 2.0B)"),
    row("OLDAP-2.0.1", "Open LDAP Public License v2.0.1"),
    row("OLDAP-2.1", "Open LDAP Public License v2.1"),
    row("OLDAP-2.2", "Open LDAP Public License v2.2"),
    row("OLDAP-2.2.1", "Open LDAP Public License v2.2.1"),
    row("OLDAP-2.2.2", "Open LDAP Public License 2.2.2"),
    row("OLDAP-2.3", "Open LDAP Public License v2.3"),
    row("OLDAP-2.4", "Open LDAP Public License v2.4"),
    row("OLDAP-2.5", "Open LDAP Public License v2.5"),
    row("OLDAP-2.6", "Open LDAP Public License v2.6"),
    row("OLDAP-2.7", "Open LDAP Public License v2.7"),
    row("OLDAP-2.8", "Open LDAP Public License v2.8"),
    row("OLFL-1.3", "Open Logistics Foundation License Version 1.3"),
    row("OML", "Open Market License"),
    row("OPL-1.0", "Open Public License v1.0"),
    row("OPL-UK-3.0", "United    Kingdom Open Parliament Licence v3.0"),
    row("OPUBL-1.0", "Open Publication License v1.0"),
    row("OSET-PL-2.1", "OSET Public License version 2.1"),
    row("OSL-1.0", "Open Software License 1.0"),
    row("OSL-1.1", "Open Software License 1.1"),
    row("OSL-2.0", "Open Software License 2.0"),
    row("OSL-2.1", "Open Software License 2.1"),
    row("OSL-3.0", "Open Software License 3.0"),
    row("OpenPBS-2.3", "OpenPBS v2.3 Software License"),
    row("OpenSSL", "OpenSSL License"),
    row("OpenSSL-standalone", "OpenSSL License - standalone"),
    row("OpenVision", "OpenVision License"),
    row("PADL", "PADL License"),
    row("PDDL-1.0", "Open Data Commons Public Domain Dedication & License 1.0"),
    row("PHP-3.0", "PHP License v3.0"),
    row("PHP-3.01", "PHP License v3.01"),
    row("PPL", "Peer Production License"),
    row("PSF-2.0", "Python Software Foundation License 2.0"),
    row("Parity-6.0.0", "The Parity Public License 6.0.0"),
    row("Parity-7.0.0", "The Parity Public License 7.0.0"),
    row("Pixar", "Pixar License"),
    row("Plexus", "Plexus Classworlds License"),
    row("PolyForm-Noncommercial-1.0.0", "PolyForm Noncommercial License 1.0.0"),
    row("PolyForm-Small-Business-1.0.0", "PolyForm Small Business License 1.0.0"),
    row("PostgreSQL", "PostgreSQL License"),
    row("Python-2.0", "Python License 2.0"),
    row("Python-2.0.1", "Python License 2.0.1"),
    row("QPL-1.0", "Q Public License 1.0"),
    row("QPL-1.0-INRIA-2004", "Q Public License 1.0 - INRIA 2004 variant"),
    row("Qhull", "Qhull License"),
    row("RHeCos-1.1", "Red Hat eCos Public License v1.1"),
    row("RPL-1.1", "Reciprocal Public License 1.1"),
    row("RPL-1.5", "Reciprocal Public License 1.5"),
    row("RPSL-1.0", "RealNetworks Public Source License v1.0"),
    row("RSA-MD", "RSA Message-Digest License"),
    row("RSCPL", "Ricoh Source Code Public License"),
    row("Rdisc", "Rdisc License"),
    row("Ruby", "Ruby License"),
    row("Ruby-pty", "Ruby pty extension license"),
    row("SAX-PD", "Sax Public Domain Notice"),
    row("SAX-PD-2.0", "Sax Public Domain Notice 2.0"),
    row("SCEA", "SCEA Shared Source License"),
    row("SGI-B-1.0", "SGI Free Software License B v1.0"),
    row("SGI-B-1.1", "SGI Free Software License B v1.1"),
    row("SGI-B-2.0", "SGI Free Software License B v2.0"),
    row("SGI-OpenGL", "SGI OpenGL License"),
    row("SGP4", "SGP4 Permission Notice"),
    row("SHL-0.5", "Solderpad Hardware License v0.5"),
    row("SHL-0.51", "Solderpad Hardware License, Version 0.51"),
    row("SISSL", "Sun Industry Standards Source License v1.1"),
    row("SISSL-1.2", "Sun Industry Standards Source License v1.2"),
    row("SL", "SL License"),
    row("SMAIL-GPL", "SMAIL General Public License"),
    row("SMLNJ", "Standard ML of New Jersey License"),
    row("SMPPL", "Secure Messaging Protocol Public License"),
    row("SNIA", "SNIA Public License 1.1"),
    row("SOFA", "SOFA Software License"),
    row("SPL-1.0", "Sun Public License v1.0"),
    row("SSH-OpenSSH", "SSH OpenSSH license"),
    row("SSH-short", "SSH short notice"),
    row("SSLeay-standalone", "SSLeay License - standalone"),
    row("SSPL-1.0", "Server Side Public License, v 1"),
    row("SUL-1.0", "Sustainable Use License v1.0"),
    row("SWL", "Scheme Widget Library (SWL) Software License Agreement"),
    row("Saxpath", "Saxpath License"),
    row("SchemeReport", "Scheme Language Report License"),
    row("Sendmail", "Sendmail License"),
    row("Sendmail-8.23", "Sendmail License 8.23"),
    row("Sendmail-Open-Source-1.1", "Sendmail Open Source License v1.1"),
    row("SimPL-2.0", "Simple Public License 2.0"),
    row("Sleepycat", "Sleepycat License"),
    row("Soundex", "Soundex License"),
    row("Spencer-86", "Spencer License 86"),
    row("Spencer-94", "Spencer License 94"),
    row("Spencer-99", "Spencer License 99"),
    deprecated("StandardML-NJ", "Standard ML of New Jersey License"),
    row("SugarCRM-1.1.3", "SugarCRM Public License v1.1.3"),
    row("Sun-PPP", "Sun PPP License"),
    row("Sun-PPP-2000", "Sun PPP License (2000)"),
    row("SunPro", "SunPro License"),
    row("Symlinks", "Symlinks License"),
    row("TAPR-OHL-1.0", "TAPR Open Hardware License v1.0"),
    row("TCL", "TCL/TK License"),
    row("TCP-wrappers", "TCP Wrappers License"),
    row("TGPPL-1.0", "Transitive Grace Period Public Licence 1.0"),
    row("TMate", "TMate Open Source License"),
    row("TORQUE-1.1", "TORQUE v2.5+ Software License v1.1"),
    row("TOSL", "Trusster Open Source License"),
    row("TPDL", "Time::ParseDate License"),
    row("TPL-1.0", "THOR Public License 1.0"),
    row("TTWL", "Text-Tabs+Wrap License"),
    row("TTYP0", "TTYP0 License"),
    row("TU-Berlin-1.0", "Technische Universitaet Berlin License 1.0"),
    row("TU-Berlin-2.0", "Technische Universitaet Berlin License 2.0"),
    row("TermReadKey", "TermReadKey License"),
    row("ThirdEye", "ThirdEye License"),
    row("TrustedQSL", "TrustedQSL License"),
    row("UCAR", "UCAR License"),
    row("UCL-1.0", "Upstream Compatibility License v1.0"),
    row("UMich-Merit", "Michigan/Merit Networks License"),
    row("UPL-1.0", "Universal Permissive License v1.0"),
    row("URT-RLE", "Utah Raster Toolkit Run Length Encoded License"),
    row("Ubuntu-font-1.0", "Ubuntu Font Licence v1.0"),
    row("Unicode-3.0", "Unicode License v3"),
    row("Unicode-DFS-2015", "Unicode License Agreement - Data Files and Software (2015)"),
    row("Unicode-DFS-2016", "Unicode License Agreement - Data Files and Software (2016)"),
    row("Unicode-TOU", "Unicode Terms of Use"),
    row("UnixCrypt", "UnixCrypt License"),
    row("Unlicense", "The Unlicense"),
    row("Unlicense-libtelnet", "Unlicense - libtelnet variant"),
    row("Unlicense-libwhirlpool", "Unlicense - libwhirlpool variant"),
    row("VOSTROM", "VOSTROM Public License for Open Source"),
    row("VSL-1.0", "Vovida Software License v1.0"),
    row("Vim", "Vim License"),
    row("W3C", "W3C Software Notice and License (2002-12-31)"),
    row("W3C-19980720", "W3C Software Notice and License (1998-07-20)"),
    row("W3C-20150513", "W3C Software Notice and Document License (2015-05-13)"),
    row("WTFPL", "Do What The F*ck You Want To Public License"),
    row("Watcom-1.0", "Sybase Open Watcom Public License 1.0"),
    row("Widget-Workshop", "Widget Workshop License"),
    row("Wsuipa", "Wsuipa License"),
    row("X11", "X11 License"),
    row("X11-distribute-modifications-variant", "X11 License Distribution Modification Variant"),
    row("X11-swapped", "X11 swapped final paragraphs"),
    row("XFree86-1.1", "XFree86 License 1.1"),
    row("XSkat", "XSkat License"),
    row("Xdebug-1.03", "Xdebug License v 1.03"),
    row("Xerox", "Xerox License"),
    row("Xfig", "Xfig License"),
    row("Xnet", "X.Net License"),
    row("YPL-1.0", "Yahoo! Public License v1.0"),
    row("YPL-1.1", "Yahoo! Public License v1.1"),
    row("ZPL-1.1", "Zope Public License 1.1"),
    row("ZPL-2.0", "Zope Public License 2.0"),
    row("ZPL-2.1", "Zope Public License 2.1"),
    row("Zed", "Zed License"),
    row("Zeeff", "Zeeff License"),
    row("Zend-2.0", "Zend License v2.0"),
    row("Zimbra-1.3", "Zimbra Public License v1.3"),
    row("Zimbra-1.4", "Zimbra Public License v1.4"),
    row("Zlib", "zlib License"),
    row("any-OSI", "Any OSI License"),
    row("any-OSI-perl-modules", "Any OSI License - Perl Modules"),
    row("bcrypt-Solar-Designer", "bcrypt Solar Designer License"),
    row("blessing", "SQLite Blessing"),
    deprecated("bzip2-1.0.5", "bzip2 and libbzip2 License v1.0.5"),
    row("bzip2-1.0.6", "bzip2 and libbzip2 License v1.0.6"),
    row("check-cvs", "check-cvs License"),
    row("checkmk", "Checkmk License"),
    row("copyleft-next-0.3.0", "copyleft-next 0.3.0"),
    row("copyleft-next-0.3.1", "copyleft-next 0.3.1"),
    row("curl", "curl License"),
    row("cve-tou", "Common Vulnerability Enumeration ToU License"),
    row("diffmark", "diffmark license"),
    row("dtoa", "David M. Gay dtoa License"),
    row("dvipdfm", "dvipdfm License"),
    deprecated("eCos-2.0", "eCos license version 2.0"),
    row("eGenix", "eGenix.com Public License 1.1.0"),
    row("etalab-2.0", "Etalab Open License 2.0"),
    row("fwlw", "fwlw License"),
    row("gSOAP-1.3b", "gSOAP Public License v1.3b"),
    row("generic-xts", "Generic XTS License"),
    row("gnuplot", "gnuplot License"),
    row("gtkbook", "gtkbook License"),
    row("hdparm", "hdparm License"),
    row("iMatix", "iMatix Standard Function Library Agreement"),
    row("jove", "Jove License"),
    row("libpng-1.6.35", "PNG Reference Library License v1 (for libpng 0.5 through 1.6.35)"),
    row("libpng-2.0", "PNG Reference Library version 2"),
    row("libselinux-1.0", "libselinux public domain notice"),
    row("libtiff", "libtiff License"),
    row("libutil-David-Nugent", "libutil David Nugent License"),
    row("lsof", "lsof License"),
    row("magaz", "magaz License"),
    row("mailprio", "mailprio License"),
    row("man2html", "man2html License"),
    row("metamail", "metamail License"),
    row("mpi-permissive", "mpi Permissive License"),
    row("mpich2", "mpich2 License"),
    row("mplus", "mplus Font License"),
    row("ngrep", "ngrep License"),
    row("pkgconf", "pkgconf License"),
    row("pnmstitch", "pnmstitch License"),
    row("psfrag", "psfrag License"),
    row("psutils", "psutils License"),
    row("python-ldap", "Python ldap License"),
    row("radvd", "radvd License"),
    row("snprintf", "snprintf License"),
    row("softSurfer", "softSurfer License"),
    row("ssh-keyscan", "ssh-keyscan License"),
    row("swrule", "swrule License"),
    row("threeparttable", "threeparttable License"),
    row("ulem", "ulem License"),
    row("w3m", "w3m License"),
    row("wwl", "WWL License"),
    deprecated("wxWindows", "wxWindows Library License"),
    row("xinetd", "xinetd License"),
    row("xkeyboard-config-Zinoviev", "xkeyboard-config Zinoviev License"),
    row("xlock", "xlock License"),
    row("xpp", "XPP License"),
    row("xzoom", "xzoom License"),
    row("zlib-acknowledgement", "zlib/libpng License with Acknowledgement"),
];
